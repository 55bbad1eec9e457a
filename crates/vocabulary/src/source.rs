use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Result, VocabularyError};

/// Language -> "sense/sense" string, as written in a source document.
pub(crate) type RawGlosses = BTreeMap<String, String>;

pub(crate) type RawAtoms = BTreeMap<String, RawGlosses>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RawVocabulary {
    pub schema_version: Option<u32>,
    pub version: Option<String>,
    pub default_language: Option<String>,
    pub types: RawAtoms,
    pub entities: RawAtoms,
    pub verbs: RawAtoms,
    pub modifiers: RawAtoms,
    pub time: RawAtoms,
    pub quantifiers: RawAtoms,
    pub aspect: RawAtoms,
    pub extended: RawAtoms,
    pub discourse: RawAtoms,
    pub emotion: RawAtoms,
    pub domains: BTreeMap<String, RawDomain>,
    pub disambiguation: BTreeMap<String, RawAtoms>,
    pub encoder_overrides: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RawDomain {
    pub alias: Option<String>,
    pub name: RawGlosses,
    pub atoms: RawAtoms,
}

/// Parses a JSON document, or a TOML document with the same shape.
pub(crate) fn parse_raw(bytes: &[u8]) -> Result<RawVocabulary> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| VocabularyError::Parse(format!("source is not UTF-8: {err}")))?;
    let body = text.trim_start_matches('\u{feff}');
    if body.trim_start().starts_with('{') {
        return Ok(serde_json::from_str(body)?);
    }
    Ok(toml::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_sources() {
        let raw = parse_raw(br#"{ "version": "1.0", "verbs": { "k": { "en": "know" } } }"#)
            .expect("json parses");
        assert_eq!(raw.version.as_deref(), Some("1.0"));
        assert_eq!(raw.verbs["k"]["en"], "know");
    }

    #[test]
    fn parses_toml_sources() {
        let toml = r#"
            version = "1.0"

            [entities.I]
            en = "I/me"

            [domains.cd]
            alias = "c"
            name = { en = "code" }
            atoms = { fn = { en = "function" } }
        "#;
        let raw = parse_raw(toml.as_bytes()).expect("toml parses");
        assert_eq!(raw.entities["I"]["en"], "I/me");
        assert_eq!(raw.domains["cd"].alias.as_deref(), Some("c"));
        assert_eq!(raw.domains["cd"].atoms["fn"]["en"], "function");
    }

    #[test]
    fn rejects_unknown_sections() {
        let err = parse_raw(br#"{ "verbz": {} }"#).unwrap_err();
        assert!(matches!(err, VocabularyError::Json(_)), "{err}");
    }

    #[test]
    fn reports_toml_errors_for_non_json_text() {
        let err = parse_raw(b"this is = = not valid").unwrap_err();
        assert!(matches!(err, VocabularyError::Toml(_)), "{err}");
    }
}
