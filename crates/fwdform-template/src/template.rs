use std::borrow::Cow;

use crate::{escape, unescape, RenderError, Values};

/// A parsed template: literal text and placeholders, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template<'s> {
    pub items: Vec<Item<'s>>,
}

/// One span of a template.
///
/// Both variants borrow the source in its escaped form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Item<'s> {
    Literal(&'s str),
    /// The raw name between the delimiters.
    Placeholder(&'s str),
}

impl<'s> Item<'s> {
    /// The lookup key of a placeholder: its name with escapes removed.
    pub fn key(&self) -> Option<Cow<'s, str>> {
        match self {
            Self::Placeholder(raw) => Some(unescape(raw)),
            Self::Literal(_) => None,
        }
    }
}

impl<'s> Template<'s> {
    /// Substitute every placeholder, leaving the result in escaped form.
    ///
    /// Values are escaped before they are spliced in, so a later [`unescape`]
    /// pass turns them back into exactly what was submitted while never
    /// treating them as template syntax.
    pub fn resolve<V>(&self, values: &V) -> Result<String, RenderError>
    where
        V: Values + ?Sized,
    {
        let mut resolved = String::with_capacity(self.literal_len());
        for item in &self.items {
            match item {
                Item::Literal(text) => resolved.push_str(text),
                Item::Placeholder(raw) => {
                    let key = unescape(raw);
                    let value = values
                        .get_value(&key)
                        .ok_or_else(|| RenderError::MissingParameter(key.into_owned()))?;
                    resolved.push_str(&escape(&value));
                }
            }
        }

        Ok(resolved)
    }

    /// Substitute every placeholder and resolve all escapes.
    pub fn render<V>(&self, values: &V) -> Result<String, RenderError>
    where
        V: Values + ?Sized,
    {
        let resolved = self.resolve(values)?;
        Ok(unescape(&resolved).into_owned())
    }

    /// Whether any placeholder looks up `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }

    /// Lookup keys of all placeholders, in order, with repeats.
    pub fn keys(&self) -> impl Iterator<Item = Cow<'s, str>> + '_ {
        self.items.iter().filter_map(Item::key)
    }

    fn literal_len(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Item::Literal(text) => text.len(),
                Item::Placeholder(_) => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::{RenderError, Template};

    #[test]
    fn keys_are_unescaped() {
        let template = Template::parse(r"%a% %b\%c% %a%");
        let keys: Vec<_> = template.keys().collect();
        assert_eq!(keys, ["a", "b%c", "a"]);
        assert!(template.has_key("b%c"));
        assert!(!template.has_key(r"b\%c"));
    }

    #[test]
    fn resolve_keeps_escaped_form() {
        let template = Template::parse(r"%pct% of 100\%");
        let values = [("pct", "50%")];
        assert_eq!(template.resolve(&values).unwrap(), r"50\% of 100\%");
        assert_eq!(template.render(&values).unwrap(), "50% of 100%");
    }

    #[test]
    fn first_missing_key_is_reported() {
        let template = Template::parse("%a% %b% %c%");
        let mut values = HashMap::new();
        values.insert("a", "1");
        assert_eq!(
            template.render(&values),
            Err(RenderError::MissingParameter("b".into()))
        );
    }

    #[test]
    fn values_with_backslashes_survive() {
        let template = Template::parse("path: %path%");
        let values = [("path", r"C:\Users\%USERNAME%\")];
        assert_eq!(
            template.render(&values).unwrap(),
            r"path: C:\Users\%USERNAME%\"
        );
    }
}
