use lambda_translator::{Translator, TranslatorConfig, SEPARATOR};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

/// Canonical messages whose decode/encode cycle keeps the same atoms.
const CANONICAL: &[&str] = &[
    "!It>Ie",
    "?Uk/co",
    "~Ah.co",
    "!Ilo.li",
    ".f.c:xb.&.c:fx",
    "!Ik",
    "?Ut",
    "!Hw.kn",
];

/// Atoms of `symbols` after the leading sigil, separators removed.
fn atom_set(translator: &Translator, symbols: &str) -> (String, BTreeSet<String>) {
    let mut tokens = translator.tokenize(symbols).into_iter();
    let sigil = tokens.next().map(|t| t.text).unwrap_or_default();
    let atoms = tokens
        .map(|t| t.text)
        .filter(|text| text != SEPARATOR)
        .collect();
    (sigil, atoms)
}

#[test]
fn curated_messages_survive_decode_then_encode() {
    let translator = Translator::builtin(TranslatorConfig::default()).unwrap();
    for symbols in CANONICAL {
        let gloss = translator.decode(symbols);
        let encoded = translator.encode(&gloss);
        assert_eq!(
            atom_set(&translator, &encoded),
            atom_set(&translator, symbols),
            "{symbols} -> {gloss} -> {encoded}"
        );
    }
}

#[test]
fn curated_sentences_survive_encode_then_decode() {
    let translator = Translator::builtin(TranslatorConfig::default()).unwrap();
    let cases = [
        ("I think therefore I exist", "(assertion) I think therefore I exist"),
        ("Find the bug and fix it", "(command) find · bug · and · fix"),
        ("AI might have consciousness", "(uncertain) AI have · consciousness"),
    ];
    for (sentence, expected) in cases {
        assert_eq!(translator.decode(&translator.encode(sentence)), expected);
    }
}

#[test]
fn plain_decoding_loses_the_message_type() {
    let translator = Translator::builtin(TranslatorConfig::plain()).unwrap();
    let gloss = translator.decode("?Uk/co");
    assert_eq!(gloss, "you know about consciousness");
    assert_eq!(translator.encode(&gloss), "!Uk/co");
}
