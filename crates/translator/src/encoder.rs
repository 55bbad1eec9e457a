use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use lambda_vocabulary::{split_prefixed, Vocabulary};

use crate::session::Session;
use crate::tokenizer::Tokenizer;

/// Atom inserted between two atoms that would otherwise re-segment.
pub const SEPARATOR: &str = ".";

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "to", "it", "its", "that", "this", "with", "for", "on", "in", "at", "by",
    "as",
];

const QUESTION_LEADERS: &[&str] = &[
    "do", "does", "can", "could", "is", "are", "what", "why", "how", "who", "when", "where",
];

const COMMAND_LEADERS: &[&str] = &["find", "make", "create", "do", "please", "get", "fix", "build"];

const HEDGES: &[&str] = &["might", "maybe", "perhaps", "possibly"];

const HEDGE_PHRASE: &str = "could be";

/// Speech act of a message, written as its leading sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Assertion,
    Question,
    Command,
    Uncertain,
}

impl MessageType {
    #[must_use]
    pub const fn sigil(self) -> &'static str {
        match self {
            MessageType::Assertion => "!",
            MessageType::Question => "?",
            MessageType::Command => ".",
            MessageType::Uncertain => "~",
        }
    }

    #[must_use]
    pub fn from_sigil(sigil: &str) -> Option<Self> {
        match sigil {
            "!" => Some(MessageType::Assertion),
            "?" => Some(MessageType::Question),
            "." => Some(MessageType::Command),
            "~" => Some(MessageType::Uncertain),
            _ => None,
        }
    }
}

/// Cues found in free text. Several may hold at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cues {
    pub question: bool,
    pub uncertain: bool,
    pub command: bool,
}

impl Cues {
    /// `text` must already be lower-cased; `words` are its words in order.
    #[must_use]
    pub fn detect(text: &str, words: &[&str]) -> Self {
        let first = words.first().copied().unwrap_or_default();
        Self {
            question: text.contains('?') || QUESTION_LEADERS.contains(&first),
            uncertain: words.iter().any(|w| HEDGES.contains(w)) || text.contains(HEDGE_PHRASE),
            command: COMMAND_LEADERS.contains(&first),
        }
    }

    /// Question, then uncertain, then command; assertion otherwise.
    #[must_use]
    pub fn message_type(self) -> MessageType {
        if self.question {
            MessageType::Question
        } else if self.uncertain {
            MessageType::Uncertain
        } else if self.command {
            MessageType::Command
        } else {
            MessageType::Assertion
        }
    }

    fn is_stop_word(self, word: &str) -> bool {
        STOP_WORDS.contains(&word)
            || (self.question && QUESTION_LEADERS.contains(&word))
            || (self.uncertain && HEDGES.contains(&word))
    }
}

/// Best-effort gloss -> symbol mapping over the vocabulary's reverse index.
///
/// Lossy: words without an atom are dropped, word order is kept as written.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'v> {
    tokenizer: Tokenizer<'v>,
    vocabulary: &'v Vocabulary,
}

impl<'v> Encoder<'v> {
    #[must_use]
    pub fn new(tokenizer: Tokenizer<'v>, vocabulary: &'v Vocabulary) -> Self {
        Self {
            tokenizer,
            vocabulary,
        }
    }

    pub fn encode(&self, text: &str) -> String {
        self.encode_inner(text, None)
    }

    /// Encodes `text` under `message_type`, whatever its cues say.
    pub fn encode_as(&self, text: &str, message_type: MessageType) -> String {
        self.encode_inner(text, Some(message_type))
    }

    fn encode_inner(&self, text: &str, forced: Option<MessageType>) -> String {
        let lowered = text.trim().to_lowercase();
        let (declared, body) = self.declared_type(&lowered);
        let words: Vec<&str> = body.unicode_words().collect();

        // A decoder label already fixes the type; the body is not re-classified.
        let cues = match declared {
            Some(_) => Cues::default(),
            None => Cues::detect(body, &words),
        };
        let message_type = forced
            .or(declared)
            .unwrap_or_else(|| cues.message_type());

        let reverse = self.vocabulary.reverse();
        let mut atoms = Vec::new();
        for word in words {
            if cues.is_stop_word(word) {
                continue;
            }
            match reverse.get(word) {
                Some(atom) => atoms.push(atom),
                None => log::trace!("No atom for '{word}', dropping it"),
            }
        }
        self.join(message_type, &atoms)
    }

    /// Writes `atoms` after the sigil, separating pairs that would re-segment.
    #[must_use]
    pub fn join(&self, message_type: MessageType, atoms: &[&str]) -> String {
        let sigil = message_type.sigil();
        let mut out = String::from(sigil);
        let mut prev: Option<&str> = None;
        for &atom in atoms {
            let separate = match prev {
                Some(prev) => self.needs_separator(prev, atom),
                None => !self.splits_cleanly(sigil, atom),
            };
            if separate {
                out.push_str(SEPARATOR);
            }
            out.push_str(atom);
            prev = Some(atom);
        }
        out
    }

    /// Whether `prev` and `next` must be written with a separator between them.
    #[must_use]
    pub fn needs_separator(&self, prev: &str, next: &str) -> bool {
        if split_prefixed(prev).is_some() || split_prefixed(next).is_some() {
            return true;
        }
        if prev.chars().count() >= 2 && next.chars().count() >= 2 {
            return true;
        }
        if self.vocabulary.is_reserved_verb(prev) && next.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return true;
        }
        // Remaining collisions are whatever the tokenizer itself would merge.
        !self.splits_cleanly(prev, next)
    }

    /// Whether the tokenizer reads `left` followed by `right` as exactly those two atoms.
    fn splits_cleanly(&self, left: &str, right: &str) -> bool {
        let joined = format!("{left}{right}");
        let tokens = self.tokenizer.tokenize(&joined, &mut Session::new());
        matches!(tokens.as_slice(), [a, b] if a.text == left && b.text == right)
    }

    /// Honors a leading `(<type label>)` as written by the decoder.
    fn declared_type<'t>(&self, text: &'t str) -> (Option<MessageType>, &'t str) {
        let Some(rest) = text.strip_prefix('(') else {
            return (None, text);
        };
        let Some((label, body)) = rest.split_once(')') else {
            return (None, text);
        };
        let label = label.trim();
        let lang = self.vocabulary.default_language();
        let declared = ["!", "?", ".", "~"].into_iter().find(|sigil| {
            self.vocabulary.message_type(sigil).is_some_and(|glosses| {
                glosses
                    .languages()
                    .flat_map(|language| glosses.senses(language, lang))
                    .any(|sense| sense.to_lowercase() == label)
            })
        });
        match declared.and_then(MessageType::from_sigil) {
            Some(message_type) => (Some(message_type), body),
            None => (None, text),
        }
    }
}
