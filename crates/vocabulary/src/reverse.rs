use std::collections::{hash_map::Entry, HashMap};

use crate::atom::Glosses;

/// Gloss word -> canonical atom, used by the encoder.
///
/// Built once per vocabulary: scanned senses keep the first atom that claimed a
/// word, curated overrides always replace whatever the scan produced.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    words: HashMap<String, String>,
}

impl ReverseIndex {
    /// Indexes every word of every sense; multi-word senses contribute each word.
    pub(crate) fn scan(&mut self, atom: &str, glosses: &Glosses, language: &str) {
        let words = glosses
            .senses(language, language)
            .iter()
            .flat_map(|sense| sense.split_whitespace())
            .map(normalize_word)
            .filter(|word| !word.is_empty());
        for word in words {
            if let Entry::Vacant(slot) = self.words.entry(word) {
                slot.insert(atom.to_string());
            }
        }
    }

    pub(crate) fn override_word(&mut self, word: &str, atom: &str) {
        let word = normalize_word(word);
        if !word.is_empty() {
            self.words.insert(word, atom.to_string());
        }
    }

    /// Atom for a lower-case gloss word.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words
            .iter()
            .map(|(word, atom)| (word.as_str(), atom.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize_word(sense: &str) -> String {
    sense
        .trim()
        .trim_matches(|c| c == '(' || c == ')')
        .trim()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glosses(sense: &str) -> Glosses {
        let raw = [("en".to_string(), sense.to_string())].into_iter().collect();
        Glosses::from_sense_strings(&raw)
    }

    #[test]
    fn first_scanned_atom_wins() {
        let mut index = ReverseIndex::default();
        index.scan("e", &glosses("exist/be"), "en");
        index.scan("=", &glosses("equals/be"), "en");
        assert_eq!(index.get("be"), Some("e"));
        assert_eq!(index.get("equals"), Some("="));
    }

    #[test]
    fn overrides_replace_scanned_words() {
        let mut index = ReverseIndex::default();
        index.scan("xb", &glosses("Bug/(defect)"), "en");
        index.override_word("Bug", "c:xb");
        assert_eq!(index.get("bug"), Some("c:xb"));
        assert_eq!(index.get("defect"), Some("xb"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn multi_word_senses_index_each_word() {
        let mut index = ReverseIndex::default();
        index.scan("<", &glosses("because/caused by"), "en");
        index.scan("%", &glosses("(in progress)/ongoing"), "en");
        assert_eq!(index.get("caused"), Some("<"));
        assert_eq!(index.get("by"), Some("<"));
        assert_eq!(index.get("progress"), Some("%"));
        assert_eq!(index.get("in"), Some("%"));
        assert_eq!(index.get("caused by"), None);
    }
}
