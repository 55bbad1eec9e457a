use std::collections::BTreeMap;

use serde::Serialize;

/// Sense separator used by vocabulary sources ("think/consider").
pub const SENSE_SEPARATOR: char = '/';

/// Atom code -> glosses, ordered by code.
pub type AtomMap = BTreeMap<String, Glosses>;

/// Ordered senses of one atom, keyed by language.
///
/// Index 0 of every sense list is the primary sense. Senses are split once at
/// load time; nothing at translation time parses sense strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Glosses {
    by_language: BTreeMap<String, Vec<String>>,
}

impl Glosses {
    pub(crate) fn from_sense_strings(raw: &BTreeMap<String, String>) -> Self {
        let by_language = raw
            .iter()
            .map(|(language, senses)| (language.trim().to_string(), split_senses(senses)))
            .filter(|(language, senses)| !language.is_empty() && !senses.is_empty())
            .collect();
        Self { by_language }
    }

    /// Senses for `language`, falling back to `fallback` when the atom has none.
    #[must_use]
    pub fn senses(&self, language: &str, fallback: &str) -> &[String] {
        self.by_language
            .get(language)
            .or_else(|| self.by_language.get(fallback))
            .map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn primary(&self, language: &str, fallback: &str) -> Option<&str> {
        self.senses(language, fallback).first().map(String::as_str)
    }

    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.by_language.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.by_language.keys().map(String::as_str)
    }
}

fn split_senses(raw: &str) -> Vec<String> {
    raw.split(SENSE_SEPARATOR)
        .map(str::trim)
        .filter(|sense| !sense.is_empty())
        .map(str::to_string)
        .collect()
}

/// Core (single-character) vocabulary categories, in reverse-index scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreCategory {
    /// Message-type sigils (`!`, `?`, `.`, `~`)
    Type,
    Entity,
    Verb,
    Modifier,
    Time,
    Quantifier,
    Aspect,
}

impl CoreCategory {
    pub const ALL: [CoreCategory; 7] = [
        CoreCategory::Type,
        CoreCategory::Entity,
        CoreCategory::Verb,
        CoreCategory::Modifier,
        CoreCategory::Time,
        CoreCategory::Quantifier,
        CoreCategory::Aspect,
    ];

    /// Key of this category in a vocabulary source.
    #[must_use]
    pub const fn source_key(self) -> &'static str {
        match self {
            CoreCategory::Type => "types",
            CoreCategory::Entity => "entities",
            CoreCategory::Verb => "verbs",
            CoreCategory::Modifier => "modifiers",
            CoreCategory::Time => "time",
            CoreCategory::Quantifier => "quantifiers",
            CoreCategory::Aspect => "aspect",
        }
    }
}
