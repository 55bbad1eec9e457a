use serde::Serialize;

use crate::encoder::SEPARATOR;
use crate::lookup::{LookupEngine, LookupSource};
use crate::session::Session;
use crate::token::{Token, TokenKind};

/// Vocabulary stratum a token was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Single-character core atoms
    Core,
    /// Extended, discourse, emotion, disambiguated and session-defined atoms
    Extended,
    /// Prefixed or active-domain atoms
    Domain,
    Unknown,
}

impl Tier {
    /// Tier of a lookup result. Rendered literals are not counted.
    #[must_use]
    pub fn of(source: Option<LookupSource>) -> Option<Tier> {
        match source {
            None => Some(Tier::Unknown),
            Some(LookupSource::Numeric | LookupSource::Version) => None,
            Some(LookupSource::Core) => Some(Tier::Core),
            Some(
                LookupSource::Definition
                | LookupSource::Disambiguation
                | LookupSource::Discourse
                | LookupSource::Emotion
                | LookupSource::Extended,
            ) => Some(Tier::Extended),
            Some(LookupSource::PrefixedDomain | LookupSource::ActiveDomain) => Some(Tier::Domain),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierStats {
    pub tier0: usize,
    pub tier1: usize,
    pub tier2: usize,
    pub unknown: usize,
    pub total: usize,
}

impl TierStats {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Core => self.tier0 += 1,
            Tier::Extended => self.tier1 += 1,
            Tier::Domain => self.tier2 += 1,
            Tier::Unknown => self.unknown += 1,
        }
        self.total += 1;
    }

    #[must_use]
    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Core => self.tier0,
            Tier::Extended => self.tier1,
            Tier::Domain => self.tier2,
            Tier::Unknown => self.unknown,
        }
    }

    /// Share of counted tokens in `tier`, 0-100. Zero when nothing was counted.
    #[must_use]
    pub fn percentage(&self, tier: Tier) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(tier) as f64 * 100.0 / self.total as f64
    }
}

/// Counts tokens per tier, replaying control tokens like the decoder does.
#[derive(Debug, Clone, Copy)]
pub struct TierAnalyzer<'v> {
    engine: LookupEngine<'v>,
}

impl<'v> TierAnalyzer<'v> {
    #[must_use]
    pub fn new(engine: LookupEngine<'v>) -> Self {
        Self { engine }
    }

    pub fn analyze(&self, tokens: &[Token], session: &mut Session) -> TierStats {
        let mut stats = TierStats::default();
        let mut leading = true;
        for token in tokens {
            if token.is_control() {
                for directive in token.directives() {
                    session.apply(directive);
                }
                continue;
            }
            let first = std::mem::replace(&mut leading, false);
            let tier = match token.kind {
                TokenKind::Punctuation | TokenKind::Numeric | TokenKind::VersionLiteral => None,
                TokenKind::Core if !first && token.text == SEPARATOR => None,
                TokenKind::Unknown => Some(Tier::Unknown),
                _ => Tier::of(self.engine.lookup(&token.text, session).map(|r| r.source)),
            };
            if let Some(tier) = tier {
                stats.record(tier);
            }
        }
        stats
    }
}

/// Symbol length against decoded gloss length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompressionStats {
    /// Non-whitespace characters of the symbol text
    pub symbol_chars: usize,
    /// Characters of the decoded gloss
    pub gloss_chars: usize,
}

impl CompressionStats {
    #[must_use]
    pub fn measure(symbols: &str, gloss: &str) -> Self {
        Self {
            symbol_chars: symbols.chars().filter(|c| !c.is_whitespace()).count(),
            gloss_chars: gloss.chars().count(),
        }
    }

    /// Gloss characters per symbol character.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.symbol_chars == 0 {
            return 0.0;
        }
        self.gloss_chars as f64 / self.symbol_chars as f64
    }
}
