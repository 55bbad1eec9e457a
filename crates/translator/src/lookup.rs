use lambda_vocabulary::{split_prefixed, Glosses, Marker, Vocabulary};
use serde::Serialize;

use crate::patterns::{full_match, NUMERIC, VERSION};
use crate::session::Session;

/// Tier that answered a lookup, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    Numeric,
    Version,
    Definition,
    Disambiguation,
    PrefixedDomain,
    ActiveDomain,
    Discourse,
    Emotion,
    Extended,
    Core,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gloss<'v> {
    /// Ordered senses from the vocabulary
    Senses(&'v [String]),
    /// Rendered literal or session-local definition
    Literal(String),
}

impl Gloss<'_> {
    #[must_use]
    pub fn primary(&self) -> &str {
        match self {
            Gloss::Senses(senses) => senses.first().map_or("", String::as_str),
            Gloss::Literal(text) => text,
        }
    }

    #[must_use]
    pub fn senses(&self) -> Vec<&str> {
        match self {
            Gloss::Senses(senses) => senses.iter().map(String::as_str).collect(),
            Gloss::Literal(text) => vec![text.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'v> {
    pub source: LookupSource,
    pub gloss: Gloss<'v>,
}

/// Resolves tokens against the vocabulary and a session, first tier wins.
#[derive(Debug, Clone, Copy)]
pub struct LookupEngine<'v> {
    vocabulary: &'v Vocabulary,
    language: &'v str,
}

impl<'v> LookupEngine<'v> {
    #[must_use]
    pub fn new(vocabulary: &'v Vocabulary, language: &'v str) -> Self {
        Self {
            vocabulary,
            language,
        }
    }

    #[must_use]
    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocabulary
    }

    /// Senses of `glosses` in the engine language.
    #[must_use]
    pub fn senses(&self, glosses: &'v Glosses) -> &'v [String] {
        glosses.senses(self.language, self.vocabulary.default_language())
    }

    pub fn lookup(&self, token: &str, session: &Session) -> Option<Resolution<'v>> {
        if full_match(&NUMERIC, token) {
            return Some(literal(LookupSource::Numeric, render_numeric(&token[1..])));
        }
        if full_match(&VERSION, token) {
            let version = token.trim_start_matches('@');
            return Some(literal(LookupSource::Version, format!("[{version}]")));
        }

        let (base, marker) = Marker::split(token);

        // Definitions shadow every static tier, markers included.
        if let Some(value) = session.definition(base) {
            return Some(literal(LookupSource::Definition, value.to_string()));
        }

        let vocabulary = self.vocabulary;
        if let Some(glosses) = vocabulary.disambiguation().lookup(base, marker) {
            return Some(self.resolved(LookupSource::Disambiguation, glosses));
        }

        if let Some((prefix, atom)) = split_prefixed(base) {
            if let Some(glosses) = vocabulary.domain_atom(prefix, atom) {
                return Some(self.resolved(LookupSource::PrefixedDomain, glosses));
            }
        }

        let active = session
            .active_domains()
            .iter()
            .filter_map(|code| vocabulary.domain(code))
            .find_map(|domain| domain.atom(base));
        if let Some(glosses) = active {
            return Some(self.resolved(LookupSource::ActiveDomain, glosses));
        }

        if let Some(glosses) = vocabulary.discourse(base) {
            return Some(self.resolved(LookupSource::Discourse, glosses));
        }
        if let Some(glosses) = vocabulary.emotion(base) {
            return Some(self.resolved(LookupSource::Emotion, glosses));
        }
        if let Some(glosses) = vocabulary.extended(base) {
            return Some(self.resolved(LookupSource::Extended, glosses));
        }
        vocabulary
            .core(base)
            .map(|(_, glosses)| self.resolved(LookupSource::Core, glosses))
    }

    fn resolved(&self, source: LookupSource, glosses: &'v Glosses) -> Resolution<'v> {
        Resolution {
            source,
            gloss: Gloss::Senses(self.senses(glosses)),
        }
    }
}

fn literal(source: LookupSource, text: String) -> Resolution<'static> {
    Resolution {
        source,
        gloss: Gloss::Literal(text),
    }
}

/// `007` -> `#7`, `0` -> `#0`
fn render_numeric(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "#0".to_string()
    } else {
        format!("#{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn primary(vocabulary: &Vocabulary, token: &str, session: &Session) -> Option<(LookupSource, String)> {
        LookupEngine::new(vocabulary, "en")
            .lookup(token, session)
            .map(|r| (r.source, r.gloss.primary().to_string()))
    }

    #[test]
    fn literals_render_before_any_table() {
        let vocabulary = Vocabulary::builtin();
        let session = Session::new();
        assert_eq!(
            primary(&vocabulary, "$007", &session),
            Some((LookupSource::Numeric, "#7".to_string()))
        );
        assert_eq!(
            primary(&vocabulary, "$0", &session),
            Some((LookupSource::Numeric, "#0".to_string()))
        );
        assert_eq!(
            primary(&vocabulary, "@v1.0#h", &session),
            Some((LookupSource::Version, "[v1.0#h]".to_string()))
        );
    }

    #[test]
    fn definitions_override_static_tiers() {
        let vocabulary = Vocabulary::builtin();
        let mut session = Session::new();
        session.define("co", "cooperation");
        assert_eq!(
            primary(&vocabulary, "co", &session),
            Some((LookupSource::Definition, "cooperation".to_string()))
        );
        session.define("de", "delegate");
        assert_eq!(
            primary(&vocabulary, "de'E", &session),
            Some((LookupSource::Definition, "delegate".to_string()))
        );
    }

    #[test]
    fn markers_select_disambiguated_senses() {
        let vocabulary = Vocabulary::builtin();
        let session = Session::new();
        let sense = |token: &str| primary(&vocabulary, token, &session).map(|(_, s)| s);
        assert_eq!(sense("de").as_deref(), Some("decide"));
        assert_eq!(sense("de'E").as_deref(), Some("death"));
        assert_eq!(sense("lo-").as_deref(), Some("lose"));
        assert_eq!(sense("wo'2").as_deref(), Some("world"));
        assert_eq!(sense("lo'V").as_deref(), Some("love"));
    }

    #[test]
    fn marker_on_atom_outside_table_uses_base_spelling() {
        let vocabulary = Vocabulary::builtin();
        assert_eq!(
            primary(&vocabulary, "co-", &Session::new()),
            Some((LookupSource::Extended, "consciousness".to_string()))
        );
    }

    #[test]
    fn active_domains_precede_extended_and_follow_activation_order() {
        let vocabulary = Vocabulary::builtin();
        let mut session = Session::new();
        assert_eq!(
            primary(&vocabulary, "ty", &session),
            Some((LookupSource::Extended, "type".to_string()))
        );

        session.activate("sc");
        assert_eq!(
            primary(&vocabulary, "ty", &session),
            Some((LookupSource::ActiveDomain, "theory".to_string()))
        );

        let mut session = Session::new();
        session.activate("emo");
        session.activate("soc");
        assert_eq!(primary(&vocabulary, "cm", &session).map(|(_, s)| s).as_deref(), Some("calm"));
    }

    #[test]
    fn prefixed_atoms_resolve_aliases_and_full_codes() {
        let vocabulary = Vocabulary::builtin();
        let session = Session::new();
        for token in ["c:xb", "cd:xb"] {
            assert_eq!(
                primary(&vocabulary, token, &session),
                Some((LookupSource::PrefixedDomain, "bug".to_string()))
            );
        }
        assert_eq!(primary(&vocabulary, "q:xb", &session), None);
    }

    #[test]
    fn falls_back_to_default_language() {
        let vocabulary = Vocabulary::builtin();
        let engine = LookupEngine::new(&vocabulary, "zh");
        let session = Session::new();
        let know = engine.lookup("k", &session).unwrap();
        let find = engine.lookup("f", &session).unwrap();
        assert_eq!(know.gloss.primary(), "知道");
        assert_eq!(find.gloss.primary(), "find");
    }

    #[test]
    fn unknown_tokens_are_absent() {
        let vocabulary = Vocabulary::builtin();
        assert_eq!(primary(&vocabulary, "zz", &Session::new()), None);
        assert_eq!(primary(&vocabulary, "Q", &Session::new()), None);
    }
}
