use crate::config::TranslatorConfig;
use crate::encoder::SEPARATOR;
use crate::lookup::LookupEngine;
use crate::session::Session;
use crate::token::{Token, TokenKind};

/// Renders tokens as a gloss string.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'v> {
    engine: LookupEngine<'v>,
    config: &'v TranslatorConfig,
}

impl<'v> Decoder<'v> {
    #[must_use]
    pub fn new(engine: LookupEngine<'v>, config: &'v TranslatorConfig) -> Self {
        Self { engine, config }
    }

    /// Replays control tokens against `session` in order, so every atom is
    /// resolved with the domains active at its own position.
    pub fn decode(&self, tokens: &[Token], session: &mut Session) -> String {
        let mut label = None;
        let mut body = Vec::with_capacity(tokens.len());
        let mut leading = true;

        for token in tokens {
            if token.is_control() {
                for directive in token.directives() {
                    session.apply(directive);
                }
                continue;
            }
            let first = std::mem::replace(&mut leading, false);
            if first && token.kind == TokenKind::Core {
                if let Some(glosses) = self.engine.vocabulary().message_type(&token.text) {
                    label = self.engine.senses(glosses).first();
                    continue;
                }
            }
            body.push(self.render(token, session));
        }

        let body = body.join(" ");
        match label {
            Some(label) if self.config.emit_type_label => {
                if body.is_empty() {
                    format!("({label})")
                } else {
                    format!("({label}) {body}")
                }
            }
            _ => body,
        }
    }

    fn render(&self, token: &Token, session: &Session) -> String {
        match token.kind {
            TokenKind::Punctuation => token.text.clone(),
            TokenKind::Unknown => echo(&token.text),
            TokenKind::Core if token.text == SEPARATOR => self.config.separator_glyph.clone(),
            _ => self
                .engine
                .lookup(&token.text, session)
                .map_or_else(|| echo(&token.text), |r| r.gloss.primary().to_string()),
        }
    }
}

fn echo(raw: &str) -> String {
    format!("[{raw}]")
}
