use fwdform_template::{render, Template};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{FormParams, FwdformError, Message, Settings};

/// Subject of an auto-response when the form has none, or it renders empty.
pub const DEFAULT_RESPONSE_SUBJECT: &str = "Your confirmation";

/// Subject name used by [`compose_plain_message`] when the sender gave neither name nor email.
pub const ANONYMOUS: &str = "Anonymous";

/// A stored form definition.
///
/// Every template is optional at the type level; empty strings are treated as not configured.
/// `subject` and `body` must be present for the form to be usable, see
/// [`FormTemplates::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormTemplates {
    /// Subject of the notification sent to the form owner.
    pub subject: Option<String>,
    /// Plain text body of the notification.
    pub body: Option<String>,
    /// HTML body of the notification.
    pub html_body: Option<String>,

    /// Subject of the auto-response to the submitter.
    pub response_subject: Option<String>,
    /// Plain text body of the auto-response. No auto-response is sent without it.
    pub response_body: Option<String>,
    /// HTML body of the auto-response.
    pub response_html_body: Option<String>,
    /// Sender of the auto-response, not a template.
    pub response_from: Option<String>,
    /// Reply-to address of the auto-response, not a template.
    pub response_reply_to: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required<'f>(value: Option<&'f str>, name: &'static str) -> Result<&'f str, FwdformError> {
    value.ok_or(FwdformError::MissingField(name))
}

impl FormTemplates {
    /// Load a definition from TOML.
    pub fn from_toml(source: &str) -> Result<Self, FwdformError> {
        let form: Self = toml_edit::easy::from_str(source)?;
        Ok(form.normalized())
    }

    /// Load a definition from JSON.
    pub fn from_json(source: &str) -> Result<Self, FwdformError> {
        let form: Self = serde_json::from_str(source)?;
        Ok(form.normalized())
    }

    /// Replace empty strings with `None`.
    pub fn normalized(self) -> Self {
        Self {
            subject: non_empty(self.subject),
            body: non_empty(self.body),
            html_body: non_empty(self.html_body),
            response_subject: non_empty(self.response_subject),
            response_body: non_empty(self.response_body),
            response_html_body: non_empty(self.response_html_body),
            response_from: non_empty(self.response_from),
            response_reply_to: non_empty(self.response_reply_to),
        }
    }

    /// Check the templates a notification cannot do without.
    pub fn validate(&self) -> Result<(), FwdformError> {
        required(self.subject.as_deref(), "subject")?;
        required(self.body.as_deref(), "body")?;
        Ok(())
    }

    /// Every distinct parameter name any of the templates looks up, in order of appearance.
    pub fn parameters(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let templates = [
            &self.subject,
            &self.body,
            &self.html_body,
            &self.response_subject,
            &self.response_body,
            &self.response_html_body,
        ];
        for source in templates.into_iter().flatten() {
            for key in Template::parse(source).keys() {
                if !names.iter().any(|name| *name == key) {
                    names.push(key.into_owned());
                }
            }
        }
        names
    }
}

/// Everything a single submission results in.
///
/// This is only produced when every template rendered; a failure in any part yields no
/// dispatch at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    /// Mail to the form owner.
    pub notification: Message,
    /// Confirmation mail to the submitter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Message>,
    /// Where to send the submitter's browser afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Render a stored form against a submission.
///
/// The submitted `email` field, when non-empty, becomes the notification's reply-to address
/// and the recipient of the auto-response. The auto-response is only composed when the form
/// has a `response_body`.
pub fn compose_form_submission(
    form: &FormTemplates,
    owner_email: &str,
    params: &FormParams,
    settings: &Settings,
) -> Result<Dispatch, FwdformError> {
    let submitter = params.get_non_empty("email");

    let notification = Message {
        to: owner_email.to_owned(),
        from: settings.default_sender.clone(),
        subject: Template::parse(required(form.subject.as_deref(), "subject")?).render(params)?,
        text: Template::parse(required(form.body.as_deref(), "body")?).render(params)?,
        html: render(form.html_body.as_deref(), params)?,
        reply_to: submitter.map(str::to_owned),
    };

    let response = match (submitter, form.response_body.as_deref()) {
        (Some(submitter), Some(body)) => {
            debug!("Composing auto-response to {submitter}");
            let subject = render(form.response_subject.as_deref(), params)?
                .filter(|subject| !subject.is_empty())
                .unwrap_or_else(|| DEFAULT_RESPONSE_SUBJECT.to_owned());

            Some(Message {
                to: submitter.to_owned(),
                from: form
                    .response_from
                    .clone()
                    .unwrap_or_else(|| settings.default_sender.clone()),
                subject,
                text: Template::parse(body).render(params)?,
                html: render(form.response_html_body.as_deref(), params)?,
                reply_to: form.response_reply_to.clone(),
            })
        }
        (None, Some(_)) => {
            debug!("No submitter email, skipping auto-response");
            None
        }
        (_, None) => None,
    };

    Ok(Dispatch {
        notification,
        response,
        redirect: params.get_non_empty("redirect").map(str::to_owned),
    })
}

/// Relay a submission to the owner without any stored form.
///
/// The body is the submitted `message` field verbatim; the subject names the sender by their
/// `name`, their `email`, or [`ANONYMOUS`].
pub fn compose_plain_message(
    owner_email: &str,
    params: &FormParams,
    settings: &Settings,
) -> Result<Dispatch, FwdformError> {
    let text = required(params.get("message"), "message")?;
    let sender = params
        .get_non_empty("name")
        .or_else(|| params.get_non_empty("email"))
        .unwrap_or(ANONYMOUS);

    Ok(Dispatch {
        notification: Message {
            to: owner_email.to_owned(),
            from: settings.default_sender.clone(),
            subject: format!("Message from {sender}"),
            text: text.to_owned(),
            html: None,
            reply_to: params.get_non_empty("email").map(str::to_owned),
        },
        response: None,
        redirect: params.get_non_empty("redirect").map(str::to_owned),
    })
}
