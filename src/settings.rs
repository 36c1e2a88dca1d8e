use std::env;

use log::debug;

use crate::FwdformError;

pub const DEFAULT_SENDER_VAR: &str = "DEFAULT_SENDER";
pub const MAILGUN_DOMAIN_VAR: &str = "MAILGUN_DOMAIN";

/// Process-wide relay settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Sender address for notifications, and for auto-responses without their own sender.
    pub default_sender: String,
}

impl Settings {
    pub fn new(default_sender: impl Into<String>) -> Self {
        Self {
            default_sender: default_sender.into(),
        }
    }

    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self, FwdformError> {
        Self::from_vars(env::vars())
    }

    /// Resolve settings from name/value pairs.
    ///
    /// `DEFAULT_SENDER` wins; otherwise the sender is `fwdform@` the mail domain. Empty values
    /// count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, FwdformError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut default_sender = None;
        let mut mail_domain = None;
        for (name, value) in vars {
            let slot = match name.as_ref() {
                DEFAULT_SENDER_VAR => &mut default_sender,
                MAILGUN_DOMAIN_VAR => &mut mail_domain,
                _ => continue,
            };
            let value: String = value.into();
            if !value.is_empty() {
                *slot = Some(value);
            }
        }

        let default_sender = match (default_sender, mail_domain) {
            (Some(sender), _) => sender,
            (None, Some(domain)) => {
                debug!("No {DEFAULT_SENDER_VAR}, deriving sender from {MAILGUN_DOMAIN_VAR}");
                format!("fwdform@{domain}")
            }
            (None, None) => {
                return Err(FwdformError::MissingSetting {
                    name: DEFAULT_SENDER_VAR,
                    help: "set DEFAULT_SENDER, or MAILGUN_DOMAIN to send as fwdform@<domain>",
                })
            }
        };

        Ok(Self { default_sender })
    }
}
