//! # Lambda Translator
//!
//! Symbol text to gloss and back, over an immutable [`Vocabulary`].
//!
//! ```text
//! "@c!If/xb"
//!     │
//!     ├──> Tokenizer (ordered rules, session-aware)
//!     │        @c  !  I  f  /  xb
//!     ├──> Decoder (replays context, looks up each atom)
//!     │        "(assertion) I find about bug"
//!     └──> TierAnalyzer (core / extended / domain / unknown)
//!
//! "Find the bug" ──> Encoder (reverse index + separators) ──> ".f.c:xb"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lambda_translator::{Translator, TranslatorConfig};
//!
//! let translator = Translator::builtin(TranslatorConfig::default()).unwrap();
//! assert_eq!(translator.decode("!Ik"), "(assertion) I know");
//! assert_eq!(translator.encode("I think therefore I exist"), "!It>Ie");
//! ```
//!
//! [`Vocabulary`]: lambda_vocabulary::Vocabulary

mod config;
mod decoder;
mod encoder;
mod error;
mod lookup;
mod patterns;
mod session;
mod tiers;
mod token;
mod tokenizer;
mod translator;

pub use config::TranslatorConfig;
pub use decoder::Decoder;
pub use encoder::{Cues, Encoder, MessageType, SEPARATOR};
pub use error::{Result, TranslatorError};
pub use lookup::{Gloss, LookupEngine, LookupSource, Resolution};
pub use session::{Directive, Session};
pub use tiers::{CompressionStats, Tier, TierAnalyzer, TierStats};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use translator::{TokenReport, Translator};

pub use lambda_vocabulary::Vocabulary;
