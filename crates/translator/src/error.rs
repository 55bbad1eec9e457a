use lambda_vocabulary::VocabularyError;
use thiserror::Error;

/// Result type for translator setup
pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Errors raised while building a translator.
///
/// Translation itself never fails: unknown input is echoed, not rejected.
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Vocabulary could not be loaded
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}

impl TranslatorError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
