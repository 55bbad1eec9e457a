use std::path::PathBuf;

use thiserror::Error;

/// Result type for vocabulary operations
pub type Result<T> = std::result::Result<T, VocabularyError>;

/// Errors raised while loading or validating a vocabulary source
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// Vocabulary file could not be read
    #[error("Failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON source is malformed or has the wrong shape
    #[error("Vocabulary JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML source is malformed
    #[error("Vocabulary TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Source is neither JSON nor TOML text
    #[error("Vocabulary parse error: {0}")]
    Parse(String),

    /// An atom code or its senses failed validation
    #[error("Invalid atom '{code}' in {category}: {reason}")]
    InvalidAtom {
        category: String,
        code: String,
        reason: String,
    },

    /// A domain namespace failed validation
    #[error("Invalid domain '{code}': {reason}")]
    InvalidDomain { code: String, reason: String },

    /// A disambiguation entry failed validation
    #[error("Invalid disambiguation entry '{atom}': {reason}")]
    InvalidDisambiguation { atom: String, reason: String },

    /// An encoder override points at an atom the vocabulary cannot resolve
    #[error("Encoder override '{word}' targets unknown atom '{target}'")]
    UnknownOverrideTarget { word: String, target: String },

    /// The source declares a schema this crate does not understand
    #[error("Vocabulary schema_version {0} is not supported (expected 1)")]
    UnsupportedSchema(u32),
}

impl VocabularyError {
    /// Create an invalid atom error
    pub fn invalid_atom(
        category: impl Into<String>,
        code: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAtom {
            category: category.into(),
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid domain error
    pub fn invalid_domain(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid disambiguation error
    pub fn invalid_disambiguation(atom: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDisambiguation {
            atom: atom.into(),
            reason: reason.into(),
        }
    }
}
