use fwdform::{
    compose_form_submission, template::RenderError, FormParams, FormTemplates, FwdformError,
    Settings,
};

const FORM: &str = r#"
subject = "Booking request: %date%"
body = '''
%name% would like to book %date% for %guests% guests.

Notes:
%notes%
'''
response_subject = ""
response_body = "Hi %name%, we will confirm %date% shortly. A 20\\% deposit applies."
response_from = "bookings@example.com"
"#;

fn settings() -> Settings {
    Settings::from_vars([("MAILGUN_DOMAIN", "mg.example.com")]).unwrap()
}

#[test]
fn booking_form() {
    let form = FormTemplates::from_toml(FORM).unwrap();
    form.validate().unwrap();
    assert_eq!(form.parameters(), ["date", "name", "guests", "notes"]);

    let params = FormParams::from_urlencoded(
        b"name=Ada&email=ada%40example.com&date=1+May&guests=4&notes=Table+%25near%25+window%5C",
    );
    let dispatch = compose_form_submission(&form, "venue@example.com", &params, &settings()).unwrap();

    let notification = &dispatch.notification;
    assert_eq!(notification.from, "fwdform@mg.example.com");
    assert_eq!(notification.subject, "Booking request: 1 May");
    assert_eq!(
        notification.text,
        "Ada would like to book 1 May for 4 guests.\n\nNotes:\nTable %near% window\\\n"
    );
    assert_eq!(notification.html, None);

    let response = dispatch.response.as_ref().unwrap();
    assert_eq!(response.to, "ada@example.com");
    assert_eq!(response.from, "bookings@example.com");
    assert_eq!(response.subject, "Your confirmation");
    assert_eq!(
        response.text,
        "Hi Ada, we will confirm 1 May shortly. A 20% deposit applies."
    );
    assert_eq!(
        response.to_urlencoded(),
        "to=ada%40example.com&from=bookings%40example.com&subject=Your+confirmation\
         &text=Hi+Ada%2C+we+will+confirm+1+May+shortly.+A+20%25+deposit+applies."
    );
}

#[test]
fn missing_field_fails_the_whole_submission() {
    let form = FormTemplates::from_toml(FORM).unwrap();
    let params = FormParams::from_urlencoded(b"name=Ada&email=ada%40example.com&date=1+May");

    match compose_form_submission(&form, "venue@example.com", &params, &settings()) {
        Err(FwdformError::Template(RenderError::MissingParameter(name))) => {
            assert_eq!(name, "guests")
        }
        other => panic!("expected a missing parameter, got {other:?}"),
    }
}
