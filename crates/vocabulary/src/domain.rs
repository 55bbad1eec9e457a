use std::collections::HashMap;

use serde::Serialize;

use crate::atom::{AtomMap, Glosses};

/// Separator between a domain prefix and its atom (`c:xb`, `cd:fn`).
pub const DOMAIN_SEPARATOR: char = ':';

/// A named, aliasable sub-vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    code: String,
    alias: Option<String>,
    name: Glosses,
    atoms: AtomMap,
}

impl Domain {
    pub(crate) fn new(code: String, alias: Option<String>, name: Glosses, atoms: AtomMap) -> Self {
        Self {
            code,
            alias,
            name,
            atoms,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &Glosses {
        &self.name
    }

    /// Prefix the encoder writes in front of this domain's atoms: the alias when
    /// one exists, the full code otherwise.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.code)
    }

    #[must_use]
    pub fn atom(&self, code: &str) -> Option<&Glosses> {
        self.atoms.get(code)
    }

    pub fn atoms(&self) -> impl Iterator<Item = (&str, &Glosses)> {
        self.atoms.iter().map(|(code, glosses)| (code.as_str(), glosses))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// Maps short domain aliases to canonical domain codes.
#[derive(Debug, Clone, Default)]
pub struct DomainResolver {
    aliases: HashMap<String, String>,
}

impl DomainResolver {
    pub(crate) fn insert(&mut self, alias: &str, code: &str) {
        self.aliases.insert(alias.to_string(), code.to_string());
    }

    /// Canonical code for `alias`. Unknown input is returned unchanged and is
    /// treated as a literal domain code by the caller.
    #[must_use]
    pub fn resolve<'a>(&'a self, alias: &'a str) -> &'a str {
        self.aliases.get(alias).map_or(alias, String::as_str)
    }

    #[must_use]
    pub fn is_alias(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }
}

/// Splits `cd:fn` into `("cd", "fn")`. Both halves must be non-empty.
#[must_use]
pub fn split_prefixed(token: &str) -> Option<(&str, &str)> {
    let (prefix, atom) = token.split_once(DOMAIN_SEPARATOR)?;
    if prefix.is_empty() || atom.is_empty() {
        return None;
    }
    Some((prefix, atom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_aliases_and_passes_unknown_through() {
        let mut resolver = DomainResolver::default();
        resolver.insert("c", "cd");
        resolver.insert("v", "vb");

        assert_eq!(resolver.resolve("c"), "cd");
        assert_eq!(resolver.resolve("v"), "vb");
        assert_eq!(resolver.resolve("cd"), "cd");
        assert_eq!(resolver.resolve("q"), "q");
        assert!(resolver.is_alias("c"));
        assert!(!resolver.is_alias("cd"));
    }

    #[test]
    fn splits_prefixed_atoms() {
        assert_eq!(split_prefixed("c:xb"), Some(("c", "xb")));
        assert_eq!(split_prefixed("soc:fr"), Some(("soc", "fr")));
        assert_eq!(split_prefixed(":xb"), None);
        assert_eq!(split_prefixed("c:"), None);
        assert_eq!(split_prefixed("co"), None);
    }
}
