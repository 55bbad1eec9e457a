use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `type` tag carried by every Lambda message.
pub const MESSAGE_KIND: &str = "lambda";

/// Notation version stamped on messages when the caller does not pick one.
pub const LAMBDA_VERSION: &str = "1.8.0";

/// Lambda-encoded payload exchanged between agents, with its gloss for logs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct LambdaMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub lambda: String,
    pub english: String,
}

impl LambdaMessage {
    pub fn new(lambda: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            kind: MESSAGE_KIND.to_string(),
            version: LAMBDA_VERSION.to_string(),
            lambda: lambda.into(),
            english: english.into(),
        }
    }

    /// Stamp the vocabulary version the payload was written against.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serialize_json(self)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let message: Self = serde_json::from_str(raw).context("Invalid Lambda message")?;
        if message.kind != MESSAGE_KIND {
            anyhow::bail!(
                "Unexpected message type '{}' (expected '{MESSAGE_KIND}')",
                message.kind
            );
        }
        Ok(message)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

/// Pretty JSON schema of `T`, for tooling that validates exchanged payloads.
pub fn schema_json<T: JsonSchema>() -> Result<String> {
    let schema = schemars::schema_for!(T);
    serde_json::to_string_pretty(&schema).map_err(Into::into)
}
