use serde::Serialize;

use crate::session::Directive;

/// Raw span of the input plus the matcher that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `v1.2`, `@v1.2#tag`
    VersionLiteral,
    /// `@*`, `@c`, `@cd`; its effect is applied while scanning
    ContextSwitch(Directive),
    /// `{ns:..}` / `{def:..}`; suppressed from decoded output
    Block(Vec<Directive>),
    /// `(`, `)`, `[`, `]`, `,`
    Punctuation,
    /// `$42`
    Numeric,
    /// `c:xb`, `cd:fn`
    DomainPrefixed,
    /// `de'E`, `lo-`
    Disambiguated,
    /// Two-character discourse or emotion marker
    Discourse,
    /// Two-letter atom accepted by the lookup engine
    Extended,
    /// Single-character atom accepted by the lookup engine
    Core,
    /// Opaque run nothing recognized
    Unknown,
}

impl TokenKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            TokenKind::VersionLiteral => "version",
            TokenKind::ContextSwitch(_) => "context",
            TokenKind::Block(_) => "block",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Numeric => "numeric",
            TokenKind::DomainPrefixed => "domain",
            TokenKind::Disambiguated => "disambiguated",
            TokenKind::Discourse => "discourse",
            TokenKind::Extended => "extended",
            TokenKind::Core => "core",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Session effects carried by this token.
    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        match &self.kind {
            TokenKind::ContextSwitch(directive) => std::slice::from_ref(directive),
            TokenKind::Block(directives) => directives,
            _ => &[],
        }
    }

    /// Context switches and blocks carry no meaning of their own.
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::ContextSwitch(_) | TokenKind::Block(_)
        )
    }
}
