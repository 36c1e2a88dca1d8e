use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fwdform_template::{escape, unescape, Template};

fn one_replace(c: &mut Criterion) {
    const TEMPLATE: &str = "Hello, %name%!";
    let mut hashmap = HashMap::new();
    hashmap.insert("name", "marcus");

    let slice = &[("name", "marcus")];

    c.bench_function("one replace, hashmap", |b| {
        b.iter(|| {
            let template = Template::parse(black_box(TEMPLATE));
            black_box(template.render(&hashmap).unwrap());
        })
    });
    c.bench_function("one replace, slice", |b| {
        b.iter(|| {
            let template = Template::parse(black_box(TEMPLATE));
            black_box(template.render(slice).unwrap());
        })
    });
}

fn form_body(c: &mut Criterion) {
    const TEMPLATE: &str = "Name: %name%\nEmail: %email%\nPhone: %phone%\nCompany: %company%\n\
        Budget: %budget% (100\\% refundable)\n\n%message%\n";
    let mut hashmap = HashMap::new();
    hashmap.insert("name", "Ada Lovelace");
    hashmap.insert("email", "ada@example.com");
    hashmap.insert("phone", "+44 20 7946 0000");
    hashmap.insert("company", "Analytical Engines Ltd");
    hashmap.insert("budget", "50% upfront");
    hashmap.insert("message", "Please get in touch about %the engine%.");

    c.bench_function("form body, parse + render", |b| {
        b.iter(|| {
            let template = Template::parse(black_box(TEMPLATE));
            black_box(template.render(&hashmap).unwrap());
        })
    });

    let template = Template::parse(TEMPLATE);
    c.bench_function("form body, render only", |b| {
        b.iter(|| black_box(template.render(&hashmap).unwrap()))
    });
}

fn codec(c: &mut Criterion) {
    let text = r"C:\Users\%USERNAME%\Documents at 100% ".repeat(32);
    c.bench_function("escape + unescape", |b| {
        b.iter(|| black_box(unescape(&escape(black_box(&text))).len()))
    });
}

criterion_group!(benches, one_replace, form_body, codec);
criterion_main!(benches);
