use std::process::{ExitCode, Termination};

use fwdform_template::RenderError;
use log::error;
use miette::{Diagnostic, Report};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(url(docsrs))]
pub enum FwdformError {
    /// A stored template referenced a parameter that was not submitted.
    ///
    /// This is an authoring problem in the form definition versus the fields the HTML form
    /// actually sends. Nothing is delivered when it happens.
    #[error(transparent)]
    #[diagnostic(code(fwdform::template))]
    Template(#[from] RenderError),

    /// A field required by the relay itself was not provided.
    ///
    /// For forms this is `subject` or `body` in the definition, where an empty template counts
    /// as absent. For plain messages it is the submitted `message`, which may be empty but must
    /// be present.
    #[error("required field '{0}' is missing")]
    #[diagnostic(code(fwdform::missing_field))]
    MissingField(&'static str),

    /// The process configuration lacks a setting that has no default.
    #[error("setting '{name}' is not configured")]
    #[diagnostic(code(fwdform::settings))]
    MissingSetting {
        name: &'static str,
        #[help]
        help: &'static str,
    },

    /// A form definition file could not be parsed.
    #[error("invalid form definition: {0}")]
    #[diagnostic(code(fwdform::form_definition))]
    FormDefinition(#[from] toml_edit::easy::de::Error),

    /// JSON input or output failed.
    #[error(transparent)]
    #[diagnostic(code(fwdform::json))]
    Json(#[from] serde_json::Error),

    /// A generic I/O error.
    #[error(transparent)]
    #[diagnostic(code(fwdform::io))]
    Io(#[from] std::io::Error),
}

impl FwdformError {
    fn exit_number(&self) -> u8 {
        use FwdformError::*;
        let code: u8 = match self {
            FormDefinition(_) => 65,
            MissingField(_) => 66,
            Template(_) => 67,
            Json(_) => 70,
            Io(_) => 74,
            MissingSetting { .. } => 78,
        };

        // reserved codes
        debug_assert!(code != 64 && code != 16 && code != 1 && code != 2 && code != 0);

        code
    }

    /// The recommended exit code for this error.
    ///
    /// This will never output:
    /// - 0 (success)
    /// - 1 and 2 (catchall and shell)
    /// - 16 (binary-level fatal error)
    /// - 64 (argument parsing error)
    pub fn exit_code(&self) -> ExitCode {
        self.exit_number().into()
    }

    /// Whether the failure is caused by submitted data rather than by the relay's setup.
    ///
    /// A request layer maps these to a failed submission for the sender; everything else is
    /// an operator problem.
    pub fn is_submission_error(&self) -> bool {
        matches!(self, Self::Template(_) | Self::MissingField("message"))
    }
}

impl Termination for FwdformError {
    fn report(self) -> ExitCode {
        let code = self.exit_code();
        error!("Fatal error:\n{:?}", Report::new(self));
        code
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exit_numbers_are_distinct() {
        let errors = [
            FwdformError::Template(RenderError::MissingParameter("name".into())),
            FwdformError::MissingField("subject"),
            FwdformError::MissingSetting {
                name: "DEFAULT_SENDER",
                help: "",
            },
            FwdformError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)),
        ];
        let mut numbers: Vec<u8> = errors.iter().map(FwdformError::exit_number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), errors.len());
    }

    #[test]
    fn missing_parameter_message() {
        let err = FwdformError::from(RenderError::MissingParameter("email".into()));
        assert_eq!(err.to_string(), "missing parameter `email`");
        match &err {
            FwdformError::Template(render) => assert_eq!(render.parameter(), "email"),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.is_submission_error());
        assert!(!FwdformError::MissingField("subject").is_submission_error());
    }
}
