use std::path::Path;
use std::sync::Arc;

use lambda_vocabulary::Vocabulary;
use serde::Serialize;

use crate::config::TranslatorConfig;
use crate::decoder::Decoder;
use crate::encoder::{Encoder, MessageType};
use crate::error::{Result, TranslatorError};
use crate::lookup::{LookupEngine, LookupSource};
use crate::session::Session;
use crate::tiers::{CompressionStats, TierAnalyzer, TierStats};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// One row of the token diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenReport {
    pub token: String,
    pub kind: &'static str,
    /// Ordered senses; empty for control and unresolved tokens
    pub senses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LookupSource>,
}

/// Entry point for translation over one shared vocabulary.
///
/// Cheap to clone and safe to share: every call builds its own [`Session`].
#[derive(Debug, Clone)]
pub struct Translator {
    vocabulary: Arc<Vocabulary>,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(vocabulary: Arc<Vocabulary>, config: TranslatorConfig) -> Result<Self> {
        config.validate().map_err(TranslatorError::invalid_config)?;
        Ok(Self { vocabulary, config })
    }

    /// Translator over the bundled vocabulary
    pub fn builtin(config: TranslatorConfig) -> Result<Self> {
        Self::new(Arc::new(Vocabulary::builtin()), config)
    }

    pub fn from_vocabulary_file(path: &Path, config: TranslatorConfig) -> Result<Self> {
        let vocabulary = Vocabulary::from_file(path)?;
        Self::new(Arc::new(vocabulary), config)
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    fn engine(&self) -> LookupEngine<'_> {
        LookupEngine::new(&self.vocabulary, &self.config.language)
    }

    fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(self.engine())
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        self.tokenizer().tokenize(input, &mut Session::new())
    }

    pub fn decode(&self, input: &str) -> String {
        self.decode_with(input, &Session::new())
    }

    /// Decodes starting from a copy of `base`, e.g. domains a REPL keeps active.
    /// `base` itself is left untouched.
    pub fn decode_with(&self, input: &str, base: &Session) -> String {
        let tokens = self.tokenizer().tokenize(input, &mut base.clone());
        Decoder::new(self.engine(), &self.config).decode(&tokens, &mut base.clone())
    }

    pub fn encode(&self, text: &str) -> String {
        Encoder::new(self.tokenizer(), &self.vocabulary).encode(text)
    }

    pub fn encode_as(&self, text: &str, message_type: MessageType) -> String {
        Encoder::new(self.tokenizer(), &self.vocabulary).encode_as(text, message_type)
    }

    pub fn classify_tiers(&self, input: &str) -> TierStats {
        let tokens = self.tokenize(input);
        TierAnalyzer::new(self.engine()).analyze(&tokens, &mut Session::new())
    }

    pub fn compression(&self, input: &str) -> CompressionStats {
        CompressionStats::measure(input, &self.decode(input))
    }

    /// Per-token kind and senses, resolved at each token's own position.
    pub fn explain(&self, input: &str) -> Vec<TokenReport> {
        let engine = self.engine();
        let tokens = self.tokenize(input);
        let mut session = Session::new();
        let mut reports = Vec::with_capacity(tokens.len());
        for token in tokens {
            for directive in token.directives() {
                session.apply(directive);
            }
            let resolution = match token.kind {
                TokenKind::Unknown | TokenKind::Punctuation => None,
                _ if token.is_control() => None,
                _ => engine.lookup(&token.text, &session),
            };
            let (senses, source) = match resolution {
                Some(resolution) => (
                    resolution.gloss.senses().into_iter().map(str::to_string).collect(),
                    Some(resolution.source),
                ),
                None => (Vec::new(), None),
            };
            reports.push(TokenReport {
                kind: token.kind.label(),
                token: token.text,
                senses,
                source,
            });
        }
        reports
    }
}
