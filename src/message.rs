use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

/// One outgoing email, fully rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl Message {
    /// Fields of the mail API's `messages` endpoint, in the order they are sent.
    ///
    /// Optional parts are left out entirely when absent or empty.
    pub fn to_form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("to", self.to.as_str()),
            ("from", self.from.as_str()),
            ("subject", self.subject.as_str()),
            ("text", self.text.as_str()),
        ];
        if let Some(html) = self.html.as_deref().filter(|html| !html.is_empty()) {
            fields.push(("html", html));
        }
        if let Some(reply_to) = self.reply_to.as_deref().filter(|addr| !addr.is_empty()) {
            fields.push(("h:Reply-To", reply_to));
        }
        fields
    }

    /// The request body for the mail API, `application/x-www-form-urlencoded`.
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_form_fields())
            .finish()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To: {}", self.to)?;
        writeln!(f, "From: {}", self.from)?;
        if let Some(reply_to) = &self.reply_to {
            writeln!(f, "Reply-To: {reply_to}")?;
        }
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f)?;
        write!(f, "{}", self.text)?;

        if let Some(html) = &self.html {
            write!(f, "\n\n--- html ---\n{html}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn message() -> Message {
        Message {
            to: "owner@example.com".into(),
            from: "fwdform@mg.example.com".into(),
            subject: "New enquiry".into(),
            text: "50% off & more".into(),
            html: None,
            reply_to: Some("ada@example.com".into()),
        }
    }

    #[test]
    fn form_fields() {
        assert_eq!(
            message().to_form_fields(),
            [
                ("to", "owner@example.com"),
                ("from", "fwdform@mg.example.com"),
                ("subject", "New enquiry"),
                ("text", "50% off & more"),
                ("h:Reply-To", "ada@example.com"),
            ]
        );
    }

    #[test]
    fn empty_html_is_dropped() {
        let mut message = message();
        message.html = Some(String::new());
        message.reply_to = None;
        assert!(message
            .to_form_fields()
            .iter()
            .all(|(name, _)| *name != "html" && *name != "h:Reply-To"));
    }

    #[test]
    fn display() {
        assert_eq!(
            message().to_string(),
            "To: owner@example.com\n\
             From: fwdform@mg.example.com\n\
             Reply-To: ada@example.com\n\
             Subject: New enquiry\n\
             \n\
             50% off & more"
        );
    }

    #[test]
    fn urlencoded() {
        assert_eq!(
            message().to_urlencoded(),
            "to=owner%40example.com&from=fwdform%40mg.example.com&subject=New+enquiry\
             &text=50%25+off+%26+more&h%3AReply-To=ada%40example.com"
        );
    }
}
