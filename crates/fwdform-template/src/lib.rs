//! Percent-delimited placeholder substitution.
//!
//! A template is scanned into literal text and placeholders, and submitted
//! values are substituted in. There is no logic: no conditionals, no loops, no
//! nesting. It only replaces.
//!
//! # Syntax
//!
//! ```plain
//! Hello %name%, thanks for your order of %item%.
//! ```
//!
//! A placeholder is denoted by a pair of `%`. The contents are the key, matched
//! exactly (case-sensitive, no trimming). Any text outside of placeholders is
//! left as-is.
//!
//! To write a literal percent sign, use `\%`. To write a literal backslash, use
//! `\\`. A `%` directly after a `\` never opens a placeholder. Keys may contain
//! escaped percent signs: `%100\% sure%` looks up the key `100% sure`.
//!
//! ```plain
//! 100\% done
//! ```
//!
//! renders to `100% done` with no lookup at all.
//!
//! Substituted values are escaped before they are spliced in, so a value that
//! looks like `%secret%` comes out as that literal text and is never scanned
//! for placeholders itself.
//!
//! # Usage
//!
//! A template is first parsed to a list of items:
//!
//! ```
//! use fwdform_template::Template;
//!
//! let template = Template::parse("hello %name%");
//! assert!(template.has_key("name"));
//! ```
//!
//! …and then rendered with a map:
//!
//! ```
//! use std::collections::HashMap;
//! # use fwdform_template::Template;
//! # let template = Template::parse("hello %name%");
//! let mut values = HashMap::new();
//! values.insert("name", "Ada");
//! assert_eq!(template.render(&values).unwrap(), "hello Ada");
//! ```
//!
//! …with a list of pairs, where the first pair for a key wins:
//!
//! ```
//! # use fwdform_template::Template;
//! # let template = Template::parse("hello %name%");
//! let values = [("name", "Grace"), ("name", "Barbara")];
//! assert_eq!(template.render(&values).unwrap(), "hello Grace");
//! ```
//!
//! …or with a closure:
//!
//! ```
//! # use fwdform_template::Template;
//! use fwdform_template::vals;
//! # let template = Template::parse("hello %name%");
//! assert_eq!(
//!     template.render(&vals(|_key| Some("Hedy".into()))).unwrap(),
//!     "hello Hedy",
//! );
//! ```
//!
//! Stored templates are optional. [`render()`] takes an `Option<&str>` and
//! passes absence straight through:
//!
//! ```
//! use fwdform_template::render;
//!
//! let values = [("name", "Ada")];
//! assert_eq!(render(None, &values).unwrap(), None);
//! assert_eq!(render(Some(""), &values).unwrap().as_deref(), Some(""));
//! ```
//!
//! # Errors
//!
//! Parsing never fails: every string is a valid template, stray backslashes
//! are kept as literal text.
//!
//! Rendering returns [`RenderError::MissingParameter`] if a placeholder names
//! a key that is not in the values. No partial output is produced.

#[doc(inline)]
pub use error::*;

#[doc(inline)]
pub use escape::*;

#[doc(inline)]
pub use template::*;

#[doc(inline)]
pub use values::*;

mod error;
mod escape;
mod parser;
mod template;
mod values;

/// Render an optional template.
///
/// `None` means nothing was configured and stays `None` without any lookup.
/// Anything else, including the empty string, is parsed and rendered.
pub fn render<V>(template: Option<&str>, values: &V) -> Result<Option<String>, RenderError>
where
    V: Values + ?Sized,
{
    template
        .map(|source| Template::parse(source).render(values))
        .transpose()
}

