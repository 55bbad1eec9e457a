use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::Serialize;

use crate::atom::{AtomMap, CoreCategory, Glosses};
use crate::disambiguation::{DisambiguationEntry, DisambiguationTable, Marker, PRIMARY_KEY};
use crate::domain::{split_prefixed, Domain, DomainResolver};
use crate::error::{Result, VocabularyError};
use crate::reverse::ReverseIndex;
use crate::source::{parse_raw, RawAtoms, RawDomain, RawVocabulary};

const BUILTIN_VOCABULARY: &str = include_str!("../../../vocab/atoms.json");

const DEFAULT_LANGUAGE: &str = "en";
const UNVERSIONED: &str = "unversioned";

/// Immutable atom tables shared by every translation call.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    version: String,
    default_language: String,
    core: BTreeMap<CoreCategory, AtomMap>,
    core_index: HashMap<String, CoreCategory>,
    extended: AtomMap,
    discourse: AtomMap,
    emotion: AtomMap,
    domains: BTreeMap<String, Domain>,
    resolver: DomainResolver,
    disambiguation: DisambiguationTable,
    reverse: ReverseIndex,
    reserved_verbs: BTreeSet<String>,
}

impl Vocabulary {
    /// The vocabulary bundled with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_bytes(BUILTIN_VOCABULARY.as_bytes()).expect("bundled vocabulary must parse")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        let vocabulary = Self::from_raw(raw)?;
        log::info!(
            "Loaded vocabulary v{}: {} core, {} extended, {} domains, {} disambiguated, {} encoder words",
            vocabulary.version,
            vocabulary.core_index.len(),
            vocabulary.extended.len(),
            vocabulary.domains.len(),
            vocabulary.disambiguation.len(),
            vocabulary.reverse.len()
        );
        Ok(vocabulary)
    }

    fn from_raw(raw: RawVocabulary) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != 1 {
                return Err(VocabularyError::UnsupportedSchema(schema_version));
            }
        }

        let default_language = raw
            .default_language
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let version = raw
            .version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNVERSIONED.to_string());
        let lang = default_language.as_str();

        let mut core = BTreeMap::new();
        let mut core_index = HashMap::new();
        for (category, atoms) in [
            (CoreCategory::Type, &raw.types),
            (CoreCategory::Entity, &raw.entities),
            (CoreCategory::Verb, &raw.verbs),
            (CoreCategory::Modifier, &raw.modifiers),
            (CoreCategory::Time, &raw.time),
            (CoreCategory::Quantifier, &raw.quantifiers),
            (CoreCategory::Aspect, &raw.aspect),
        ] {
            let key = category.source_key();
            let table = build_atoms(key, atoms, lang, |code| char_count(code) == 1, "must be exactly 1 character")?;
            for code in table.keys() {
                if let Some(previous) = core_index.insert(code.clone(), category) {
                    return Err(VocabularyError::invalid_atom(
                        key,
                        code,
                        format!("already defined in {}", previous.source_key()),
                    ));
                }
            }
            core.insert(category, table);
        }

        let two_chars = |code: &str| char_count(code) == 2;
        let extended = build_atoms("extended", &raw.extended, lang, two_chars, "must be exactly 2 characters")?;
        let discourse = build_atoms("discourse", &raw.discourse, lang, two_chars, "must be exactly 2 characters")?;
        let emotion = build_atoms("emotion", &raw.emotion, lang, two_chars, "must be exactly 2 characters")?;

        let mut domains = BTreeMap::new();
        let mut resolver = DomainResolver::default();
        for (code, raw_domain) in &raw.domains {
            let domain = build_domain(code, raw_domain, lang)?;
            if let Some(alias) = domain.alias() {
                if resolver.is_alias(alias) {
                    return Err(VocabularyError::invalid_domain(
                        code,
                        format!("alias '{alias}' is used by '{}'", resolver.resolve(alias)),
                    ));
                }
                if alias != code && raw.domains.contains_key(alias) {
                    return Err(VocabularyError::invalid_domain(
                        code,
                        format!("alias '{alias}' shadows another domain code"),
                    ));
                }
                resolver.insert(alias, code);
            }
            domains.insert(code.clone(), domain);
        }

        let mut disambiguation = DisambiguationTable::default();
        for (atom, senses) in &raw.disambiguation {
            let (atom, entry) = build_disambiguation(atom, senses, lang)?;
            disambiguation.insert(atom, entry);
        }

        let mut vocabulary = Self {
            version,
            default_language,
            core,
            core_index,
            extended,
            discourse,
            emotion,
            domains,
            resolver,
            disambiguation,
            reverse: ReverseIndex::default(),
            reserved_verbs: BTreeSet::new(),
        };
        vocabulary.reverse = vocabulary.build_reverse_index(&raw.encoder_overrides)?;
        vocabulary.reserved_verbs = vocabulary.collect_reserved_verbs();
        Ok(vocabulary)
    }

    fn build_reverse_index(&self, overrides: &BTreeMap<String, String>) -> Result<ReverseIndex> {
        let lang = self.default_language.as_str();
        let mut index = ReverseIndex::default();

        // Type sigils are never produced from words.
        for category in CoreCategory::ALL.into_iter().skip(1) {
            for (code, glosses) in self.core_atoms(category) {
                index.scan(code, glosses, lang);
            }
        }
        for (code, glosses) in &self.extended {
            index.scan(code, glosses, lang);
        }
        for domain in self.domains.values() {
            for (code, glosses) in domain.atoms() {
                let prefixed = format!("{}:{code}", domain.prefix());
                index.scan(&prefixed, glosses, lang);
            }
        }

        for (word, target) in overrides {
            let target = target.trim();
            if !self.resolves(target) {
                return Err(VocabularyError::UnknownOverrideTarget {
                    word: word.clone(),
                    target: target.to_string(),
                });
            }
            index.override_word(word, target);
        }
        Ok(index)
    }

    fn collect_reserved_verbs(&self) -> BTreeSet<String> {
        let two_char_atoms: Vec<&str> = self
            .extended
            .keys()
            .map(String::as_str)
            .chain(self.disambiguation.iter().map(|(atom, _)| atom))
            .collect();
        self.core_atoms(CoreCategory::Verb)
            .map(|(code, _)| code)
            .filter(|verb| two_char_atoms.iter().any(|atom| atom.starts_with(verb)))
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Core atom and its category.
    #[must_use]
    pub fn core(&self, code: &str) -> Option<(CoreCategory, &Glosses)> {
        let category = *self.core_index.get(code)?;
        let glosses = self.core.get(&category)?.get(code)?;
        Some((category, glosses))
    }

    pub fn core_atoms(&self, category: CoreCategory) -> impl Iterator<Item = (&str, &Glosses)> {
        self.core
            .get(&category)
            .into_iter()
            .flat_map(|atoms| atoms.iter().map(|(code, glosses)| (code.as_str(), glosses)))
    }

    /// Glosses of a message-type sigil.
    #[must_use]
    pub fn message_type(&self, sigil: &str) -> Option<&Glosses> {
        match self.core(sigil)? {
            (CoreCategory::Type, glosses) => Some(glosses),
            _ => None,
        }
    }

    #[must_use]
    pub fn extended(&self, code: &str) -> Option<&Glosses> {
        self.extended.get(code)
    }

    pub fn extended_atoms(&self) -> impl Iterator<Item = (&str, &Glosses)> {
        self.extended.iter().map(|(code, glosses)| (code.as_str(), glosses))
    }

    #[must_use]
    pub fn discourse(&self, code: &str) -> Option<&Glosses> {
        self.discourse.get(code)
    }

    pub fn discourse_atoms(&self) -> impl Iterator<Item = (&str, &Glosses)> {
        self.discourse.iter().map(|(code, glosses)| (code.as_str(), glosses))
    }

    #[must_use]
    pub fn emotion(&self, code: &str) -> Option<&Glosses> {
        self.emotion.get(code)
    }

    pub fn emotion_atoms(&self) -> impl Iterator<Item = (&str, &Glosses)> {
        self.emotion.iter().map(|(code, glosses)| (code.as_str(), glosses))
    }

    #[must_use]
    pub fn domain(&self, code: &str) -> Option<&Domain> {
        self.domains.get(code)
    }

    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.domains.values()
    }

    #[must_use]
    pub fn resolver(&self) -> &DomainResolver {
        &self.resolver
    }

    /// Atom of an explicitly prefixed token (`c:xb`, `cd:xb`).
    #[must_use]
    pub fn domain_atom(&self, prefix: &str, atom: &str) -> Option<&Glosses> {
        self.domain(self.resolver.resolve(prefix))?.atom(atom)
    }

    #[must_use]
    pub fn disambiguation(&self) -> &DisambiguationTable {
        &self.disambiguation
    }

    #[must_use]
    pub fn reverse(&self) -> &ReverseIndex {
        &self.reverse
    }

    /// Single-character verbs that open a two-character atom.
    #[must_use]
    pub fn is_reserved_verb(&self, atom: &str) -> bool {
        self.reserved_verbs.contains(atom)
    }

    /// Whether `code` resolves without any session state.
    #[must_use]
    pub fn resolves(&self, code: &str) -> bool {
        if let Some((prefix, atom)) = split_prefixed(code) {
            return self.domain_atom(prefix, atom).is_some();
        }
        self.disambiguation.contains(code)
            || self.discourse.contains_key(code)
            || self.emotion.contains_key(code)
            || self.extended.contains_key(code)
            || self.core_index.contains_key(code)
    }

    #[must_use]
    pub fn summary(&self) -> VocabularySummary {
        let lang = self.default_language.as_str();
        VocabularySummary {
            version: self.version.clone(),
            default_language: self.default_language.clone(),
            core: CoreCategory::ALL
                .into_iter()
                .map(|category| CategorySummary {
                    category,
                    atoms: self.core_atoms(category).map(|(code, _)| code.to_string()).collect(),
                })
                .collect(),
            extended: self.extended.len(),
            discourse: self.discourse.len(),
            emotion: self.emotion.len(),
            domains: self
                .domains
                .values()
                .map(|domain| DomainSummary {
                    code: domain.code().to_string(),
                    alias: domain.alias().map(str::to_string),
                    name: domain.name().primary(lang, lang).unwrap_or(domain.code()).to_string(),
                    atoms: domain.len(),
                })
                .collect(),
            disambiguation: self.disambiguation.len(),
            encoder_words: self.reverse.len(),
        }
    }
}

/// Counts reported by `vocab` listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularySummary {
    pub version: String,
    pub default_language: String,
    pub core: Vec<CategorySummary>,
    pub extended: usize,
    pub discourse: usize,
    pub emotion: usize,
    pub domains: Vec<DomainSummary>,
    pub disambiguation: usize,
    pub encoder_words: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: CoreCategory,
    pub atoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainSummary {
    pub code: String,
    pub alias: Option<String>,
    pub name: String,
    pub atoms: usize,
}

fn char_count(code: &str) -> usize {
    code.chars().count()
}

fn is_lowercase_word(code: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_lowercase())
}

fn build_glosses(category: &str, code: &str, raw: &BTreeMap<String, String>, lang: &str) -> Result<Glosses> {
    let glosses = Glosses::from_sense_strings(raw);
    if !glosses.has_language(lang) {
        return Err(VocabularyError::invalid_atom(
            category,
            code,
            format!("no senses in default language '{lang}'"),
        ));
    }
    Ok(glosses)
}

fn build_atoms(
    category: &str,
    raw: &RawAtoms,
    lang: &str,
    valid_code: impl Fn(&str) -> bool,
    expectation: &str,
) -> Result<AtomMap> {
    let mut atoms = AtomMap::new();
    for (code, senses) in raw {
        if code.is_empty() || code.chars().any(char::is_whitespace) {
            return Err(VocabularyError::invalid_atom(category, code, "code is empty or contains whitespace"));
        }
        if !valid_code(code) {
            return Err(VocabularyError::invalid_atom(category, code, expectation));
        }
        atoms.insert(code.clone(), build_glosses(category, code, senses, lang)?);
    }
    Ok(atoms)
}

fn build_domain(code: &str, raw: &RawDomain, lang: &str) -> Result<Domain> {
    if !is_lowercase_word(code, 1, 3) {
        return Err(VocabularyError::invalid_domain(code, "code must be 1-3 lowercase letters"));
    }
    let alias = match raw.alias.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(alias) if is_lowercase_word(alias, 1, 1) => Some(alias.to_string()),
        Some(alias) => {
            return Err(VocabularyError::invalid_domain(
                code,
                format!("alias '{alias}' must be one lowercase letter"),
            ))
        }
    };
    let name = Glosses::from_sense_strings(&raw.name);
    let category = format!("domains.{code}");
    let atoms = build_atoms(
        &category,
        &raw.atoms,
        lang,
        |atom| is_lowercase_word(atom, 2, 3),
        "domain atoms must be 2-3 lowercase letters",
    )?;
    Ok(Domain::new(code.to_string(), alias, name, atoms))
}

fn build_disambiguation(atom: &str, raw: &RawAtoms, lang: &str) -> Result<(String, DisambiguationEntry)> {
    if !is_lowercase_word(atom, 2, 2) {
        return Err(VocabularyError::invalid_disambiguation(atom, "atom must be 2 lowercase letters"));
    }
    let category = format!("disambiguation.{atom}");
    let primary = match raw.get(PRIMARY_KEY) {
        Some(senses) => build_glosses(&category, atom, senses, lang)?,
        None => {
            return Err(VocabularyError::invalid_disambiguation(atom, "missing primary sense"));
        }
    };
    let mut alternates = BTreeMap::new();
    for (key, senses) in raw.iter().filter(|(key, _)| key.as_str() != PRIMARY_KEY) {
        let Some(marker) = Marker::from_key(key) else {
            return Err(VocabularyError::invalid_disambiguation(
                atom,
                format!("unknown marker '{key}'"),
            ));
        };
        alternates.insert(marker, build_glosses(&category, atom, senses, lang)?);
    }
    Ok((atom.to_string(), DisambiguationEntry::new(primary, alternates)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn load(json: &str) -> Result<Vocabulary> {
        Vocabulary::from_bytes(json.as_bytes())
    }

    #[test]
    fn builtin_vocabulary_parses() {
        let vocabulary = Vocabulary::builtin();
        assert_eq!(vocabulary.version(), "1.8.0");
        assert_eq!(vocabulary.default_language(), "en");
        assert!(vocabulary.message_type("!").is_some());
        assert!(vocabulary.message_type("I").is_none());
    }

    #[test]
    fn builtin_reverse_index_applies_overrides() {
        let vocabulary = Vocabulary::builtin();
        let reverse = vocabulary.reverse();
        assert_eq!(reverse.get("bug"), Some("c:xb"));
        assert_eq!(reverse.get("think"), Some("t"));
        assert_eq!(reverse.get("i"), Some("I"));
        assert_eq!(reverse.get("theory"), Some("s:ty"));
        // scanned from extended before any domain claims it
        assert_eq!(reverse.get("type"), Some("ty"));
    }

    #[test]
    fn reserved_verbs_open_two_character_atoms() {
        let vocabulary = Vocabulary::builtin();
        assert!(vocabulary.is_reserved_verb("k"));
        assert!(vocabulary.is_reserved_verb("h"));
        assert!(!vocabulary.is_reserved_verb("I"));
        assert!(!vocabulary.is_reserved_verb("kn"));
    }

    #[test]
    fn resolves_prefixed_atoms_through_aliases() {
        let vocabulary = Vocabulary::builtin();
        assert!(vocabulary.resolves("c:xb"));
        assert!(vocabulary.resolves("cd:xb"));
        assert!(!vocabulary.resolves("q:xb"));
        assert!(vocabulary.resolves("de"));
        assert!(!vocabulary.resolves("zz"));
    }

    #[test]
    fn rejects_unsupported_schema() {
        let err = load(r#"{ "schema_version": 2 }"#).unwrap_err();
        assert!(matches!(err, VocabularyError::UnsupportedSchema(2)));
    }

    #[test]
    fn rejects_multi_character_core_atoms() {
        let err = load(r#"{ "verbs": { "kn": { "en": "know" } } }"#).unwrap_err();
        assert!(matches!(err, VocabularyError::InvalidAtom { .. }), "{err}");
    }

    #[test]
    fn rejects_duplicate_core_codes() {
        let err = load(
            r#"{ "verbs": { "n": { "en": "note" } }, "time": { "n": { "en": "now" } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("already defined in verbs"), "{err}");
    }

    #[test]
    fn rejects_atoms_without_default_language_senses() {
        let err = load(r#"{ "extended": { "co": { "zh": "意识" } } }"#).unwrap_err();
        assert!(err.to_string().contains("default language 'en'"), "{err}");
    }

    #[test]
    fn rejects_bad_domain_aliases() {
        let err = load(r#"{ "domains": { "cd": { "alias": "cx", "atoms": {} } } }"#).unwrap_err();
        assert!(matches!(err, VocabularyError::InvalidDomain { .. }), "{err}");

        let err = load(
            r#"{ "domains": {
                "cd": { "alias": "c", "atoms": {} },
                "co": { "alias": "c", "atoms": {} }
            } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, VocabularyError::InvalidDomain { .. }), "{err}");
    }

    #[test]
    fn rejects_disambiguation_without_primary_or_with_unknown_marker() {
        let err = load(r#"{ "disambiguation": { "de": { "E": { "en": "death" } } } }"#).unwrap_err();
        assert!(err.to_string().contains("missing primary"), "{err}");

        let err = load(
            r#"{ "disambiguation": { "de": { "primary": { "en": "decide" }, "Q": { "en": "x" } } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown marker 'Q'"), "{err}");
    }

    #[test]
    fn rejects_override_targets_that_do_not_resolve() {
        let err = load(
            r#"{ "verbs": { "k": { "en": "know" } }, "encoder_overrides": { "knows": "kx" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, VocabularyError::UnknownOverrideTarget { .. }), "{err}");
    }

    #[test]
    fn falls_back_to_default_language() {
        let vocabulary = load(
            r#"{ "default_language": "en", "verbs": { "k": { "en": "know", "zh": "知道" }, "t": { "en": "think" } } }"#,
        )
        .expect("valid vocabulary");
        let (_, know) = vocabulary.core("k").expect("k");
        let (_, think) = vocabulary.core("t").expect("t");
        assert_eq!(know.primary("zh", vocabulary.default_language()), Some("知道"));
        assert_eq!(think.primary("zh", vocabulary.default_language()), Some("think"));
    }

    #[test]
    fn summary_counts_domains() {
        let summary = Vocabulary::builtin().summary();
        let code = summary
            .domains
            .iter()
            .find(|d| d.code == "cd")
            .expect("code domain");
        assert_eq!(code.alias.as_deref(), Some("c"));
        assert_eq!(code.name, "code");
        assert!(code.atoms > 0);
        assert_eq!(summary.disambiguation, 13);
    }
}
