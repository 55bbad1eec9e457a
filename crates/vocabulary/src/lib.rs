//! # Lambda Vocabulary
//!
//! Immutable atom tables for the Lambda notation: core single-character atoms,
//! the extended two-character tier, discourse and emotion markers, domain
//! namespaces with their aliases, the disambiguation table, and the reverse
//! index the encoder uses to map gloss words back to atoms.
//!
//! ```text
//! atoms.json / atoms.toml
//!     │
//!     ├──> parse (JSON, TOML fallback)
//!     ├──> validate codes, aliases, markers, overrides
//!     └──> Vocabulary
//!          ├─> core / extended / discourse / emotion tables
//!          ├─> domains + DomainResolver
//!          ├─> DisambiguationTable
//!          └─> ReverseIndex (scanned senses, then overrides)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lambda_vocabulary::Vocabulary;
//!
//! let vocabulary = Vocabulary::builtin();
//! let (_, glosses) = vocabulary.core("k").unwrap();
//! assert_eq!(glosses.primary("en", vocabulary.default_language()), Some("know"));
//! assert_eq!(vocabulary.resolver().resolve("c"), "cd");
//! ```

mod atom;
mod disambiguation;
mod domain;
mod error;
mod reverse;
mod source;
mod vocabulary;

pub use atom::{AtomMap, CoreCategory, Glosses, SENSE_SEPARATOR};
pub use disambiguation::{DisambiguationEntry, DisambiguationTable, Marker};
pub use domain::{split_prefixed, Domain, DomainResolver, DOMAIN_SEPARATOR};
pub use error::{Result, VocabularyError};
pub use reverse::ReverseIndex;
pub use vocabulary::{CategorySummary, DomainSummary, Vocabulary, VocabularySummary};
