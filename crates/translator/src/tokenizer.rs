use lambda_vocabulary::Vocabulary;

use crate::lookup::LookupEngine;
use crate::patterns::{leading_match, DISAMBIGUATED, DOMAIN_PREFIXED, NUMERIC, VERSION};
use crate::session::{Directive, Session};
use crate::token::{Token, TokenKind};

const PUNCTUATION: &[char] = &['(', ')', '[', ']', ','];

/// Characters that end an unknown run.
const RUN_BREAKS: &[char] = &['(', ')', '[', ']', '{', '}', ',', '$', '@'];

/// Matchers in priority order. The first one that accepts at a position wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    VersionLiteral,
    ContextSwitch,
    Block,
    Punctuation,
    Numeric,
    DomainPrefixed,
    Disambiguated,
    Discourse,
    Extended,
    Core,
}

const RULES: [Rule; 10] = [
    Rule::VersionLiteral,
    Rule::ContextSwitch,
    Rule::Block,
    Rule::Punctuation,
    Rule::Numeric,
    Rule::DomainPrefixed,
    Rule::Disambiguated,
    Rule::Discourse,
    Rule::Extended,
    Rule::Core,
];

/// Context-sensitive scanner.
///
/// Token boundaries depend on the vocabulary: a two-letter span becomes one
/// token only when the lookup engine resolves it under the current session,
/// otherwise scanning falls back to single characters. Context switches and
/// blocks update the session as they are scanned, so later spans see the
/// domains activated before them.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'v> {
    engine: LookupEngine<'v>,
}

impl<'v> Tokenizer<'v> {
    #[must_use]
    pub fn new(engine: LookupEngine<'v>) -> Self {
        Self { engine }
    }

    fn vocabulary(&self) -> &'v Vocabulary {
        self.engine.vocabulary()
    }

    /// Splits `input` into tokens. Whitespace separates tokens and is dropped;
    /// every other character lands in exactly one token.
    pub fn tokenize(&self, input: &str, session: &mut Session) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        while let Some(ch) = input[pos..].chars().next() {
            if ch.is_whitespace() {
                pos += ch.len_utf8();
                continue;
            }
            let rest = &input[pos..];
            let token = RULES
                .iter()
                .find_map(|rule| self.apply_rule(*rule, rest, session))
                .unwrap_or_else(|| self.unknown_run(rest, session));
            for directive in token.directives() {
                session.apply(directive);
            }
            pos += token.text.len();
            tokens.push(token);
        }
        tokens
    }

    fn apply_rule(&self, rule: Rule, rest: &str, session: &Session) -> Option<Token> {
        match rule {
            Rule::VersionLiteral => self.version_literal(rest),
            Rule::ContextSwitch => self.context_switch(rest),
            Rule::Block => self.block(rest),
            Rule::Punctuation => rest
                .starts_with(PUNCTUATION)
                .then(|| Token::new(&rest[..1], TokenKind::Punctuation)),
            Rule::Numeric => {
                leading_match(&NUMERIC, rest).map(|end| Token::new(&rest[..end], TokenKind::Numeric))
            }
            Rule::DomainPrefixed => leading_match(&DOMAIN_PREFIXED, rest)
                .map(|end| Token::new(&rest[..end], TokenKind::DomainPrefixed)),
            Rule::Disambiguated => {
                let end = leading_match(&DISAMBIGUATED, rest)?;
                self.resolves(&rest[..2], session)
                    .then(|| Token::new(&rest[..end], TokenKind::Disambiguated))
            }
            Rule::Discourse => {
                let pair = leading_chars(rest, 2)?;
                let vocabulary = self.vocabulary();
                (vocabulary.discourse(pair).is_some() || vocabulary.emotion(pair).is_some())
                    .then(|| Token::new(pair, TokenKind::Discourse))
            }
            Rule::Extended => {
                let pair = leading_chars(rest, 2)?;
                (pair.bytes().all(|b| b.is_ascii_lowercase()) && self.resolves(pair, session))
                    .then(|| Token::new(pair, TokenKind::Extended))
            }
            Rule::Core => {
                let single = leading_chars(rest, 1)?;
                self.resolves(single, session)
                    .then(|| Token::new(single, TokenKind::Core))
            }
        }
    }

    fn resolves(&self, text: &str, session: &Session) -> bool {
        self.engine.lookup(text, session).is_some()
    }

    fn version_literal(&self, rest: &str) -> Option<Token> {
        let mut chars = rest.chars();
        let opens = match (chars.next(), chars.next()) {
            (Some('@'), _) => true,
            (Some('v'), Some(next)) => next.is_ascii_digit(),
            _ => false,
        };
        if !opens {
            return None;
        }
        leading_match(&VERSION, rest).map(|end| Token::new(&rest[..end], TokenKind::VersionLiteral))
    }

    fn context_switch(&self, rest: &str) -> Option<Token> {
        let after = rest.strip_prefix('@')?;
        let bare = || Token::new("@", TokenKind::Core);

        if after.starts_with('*') {
            return Some(Token::new(
                "@*",
                TokenKind::ContextSwitch(Directive::ClearDomains),
            ));
        }
        let bytes = after.as_bytes();
        if bytes.first() == Some(&b'v') && bytes.get(1).is_some_and(u8::is_ascii_digit) {
            return Some(bare());
        }

        let vocabulary = self.vocabulary();
        let letters = bytes
            .iter()
            .take(3)
            .take_while(|b| b.is_ascii_lowercase())
            .count();
        // Full domain codes first, longest wins; aliases only after that.
        for len in (1..=letters).rev() {
            let code = &after[..len];
            if vocabulary.domain(code).is_some() {
                return Some(activation(&rest[..=len], code));
            }
        }
        if letters > 0 {
            let alias = &after[..1];
            let resolver = vocabulary.resolver();
            if resolver.is_alias(alias) {
                let code = resolver.resolve(alias);
                if vocabulary.domain(code).is_some() {
                    return Some(activation(&rest[..2], code));
                }
            }
            log::debug!("'@{alias}' does not name a domain, reading '@' as a reference");
        }
        Some(bare())
    }

    fn block(&self, rest: &str) -> Option<Token> {
        if !rest.starts_with('{') {
            return None;
        }
        let Some(close) = rest.find('}') else {
            // Unterminated: everything up to the next whitespace stays literal.
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            return Some(Token::new(&rest[..end], TokenKind::Unknown));
        };
        let directives = self.block_directives(&rest[1..close]);
        Some(Token::new(&rest[..=close], TokenKind::Block(directives)))
    }

    fn block_directives(&self, content: &str) -> Vec<Directive> {
        let content = content.trim();
        if let Some(namespace) = content.strip_prefix("ns:") {
            let vocabulary = self.vocabulary();
            let code = vocabulary.resolver().resolve(namespace.trim());
            if vocabulary.domain(code).is_none() {
                log::debug!("Ignoring namespace block for unknown domain '{code}'");
                return Vec::new();
            }
            return vec![Directive::ActivateDomain {
                code: code.to_string(),
            }];
        }
        if let Some(definitions) = content.strip_prefix("def:") {
            return definitions
                .split(',')
                .filter_map(|pair| pair.split_once('='))
                .map(|(key, value)| (strip_quotes(key), strip_quotes(value)))
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| Directive::Define {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect();
        }
        log::debug!("Ignoring block with unrecognized content '{content}'");
        Vec::new()
    }

    /// Consumes at least one character, stopping before whitespace, a
    /// bracket, a sigil or any position where one of the rules would accept.
    fn unknown_run(&self, rest: &str, session: &Session) -> Token {
        let mut chars = rest.char_indices();
        let mut end = chars.next().map_or(rest.len(), |(_, ch)| ch.len_utf8());
        for (idx, ch) in chars {
            if ch.is_whitespace() || RUN_BREAKS.contains(&ch) {
                break;
            }
            let tail = &rest[idx..];
            if RULES
                .iter()
                .any(|rule| self.apply_rule(*rule, tail, session).is_some())
            {
                break;
            }
            end = idx + ch.len_utf8();
        }
        let text = &rest[..end];
        log::debug!("Unrecognized input '{text}'");
        Token::new(text, TokenKind::Unknown)
    }
}

fn activation(text: &str, code: &str) -> Token {
    Token::new(
        text,
        TokenKind::ContextSwitch(Directive::ActivateDomain {
            code: code.to_string(),
        }),
    )
}

/// First `count` characters of `text`, when it has that many.
fn leading_chars(text: &str, count: usize) -> Option<&str> {
    match text.char_indices().nth(count) {
        Some((end, _)) => Some(&text[..end]),
        None if text.chars().count() == count => Some(text),
        None => None,
    }
}

fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}
