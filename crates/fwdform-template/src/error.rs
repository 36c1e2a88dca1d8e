#[cfg(feature = "miette")]
use miette::Diagnostic;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
pub enum RenderError {
    /// A placeholder named a key that is not in the provided values.
    ///
    /// The key is the unescaped placeholder name, as it was looked up.
    #[error("missing parameter `{0}`")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(fwdform::template::missing_parameter),
            help("submit a field with this exact name, or remove the placeholder from the template")
        )
    )]
    MissingParameter(String),
}

impl RenderError {
    /// The key that failed to resolve.
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingParameter(key) => key,
        }
    }
}
