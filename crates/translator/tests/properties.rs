use lambda_translator::{
    Encoder, LookupEngine, MessageType, Tokenizer, TokenKind, Translator, TranslatorConfig,
    SEPARATOR,
};
use lambda_vocabulary::{CoreCategory, Vocabulary};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn translator() -> &'static Translator {
    static TRANSLATOR: OnceLock<Translator> = OnceLock::new();
    TRANSLATOR.get_or_init(|| Translator::builtin(TranslatorConfig::default()).unwrap())
}

fn vocabulary() -> &'static Vocabulary {
    translator().vocabulary()
}

/// Every atom the encoder can emit, without the separator itself.
fn emitted_atoms() -> Vec<String> {
    let atoms: BTreeSet<&str> = vocabulary()
        .reverse()
        .iter()
        .map(|(_, atom)| atom)
        .filter(|atom| *atom != SEPARATOR)
        .collect();
    atoms.into_iter().map(str::to_string).collect()
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn message_type() -> impl Strategy<Value = MessageType> {
    prop_oneof![
        Just(MessageType::Assertion),
        Just(MessageType::Question),
        Just(MessageType::Command),
        Just(MessageType::Uncertain),
    ]
}

proptest! {
    #[test]
    fn proptest_tokens_partition_input(input in "\\PC{0,40}") {
        let tokens = translator().tokenize(&input);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(strip_whitespace(&joined), strip_whitespace(&input));
        prop_assert!(tokens.iter().all(|t| !t.text.is_empty()));
    }

    #[test]
    fn proptest_tokens_partition_symbol_text(
        input in "[!?.~IUHAXkthfmcew><&|/+\\-^_=@*$0-9a-z:'{}()\\[\\], ]{0,40}"
    ) {
        let tokens = translator().tokenize(&input);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(strip_whitespace(&joined), strip_whitespace(&input));
    }

    #[test]
    fn proptest_decode_is_total_and_echoes_unknowns(input in "\\PC{0,40}") {
        let decoded = translator().decode(&input);
        for token in translator().tokenize(&input) {
            if token.kind == TokenKind::Unknown {
                let echoed = format!("[{}]", token.text);
                prop_assert!(decoded.contains(&echoed));
            }
        }
    }

    #[test]
    fn proptest_encoder_output_retokenizes_to_its_atoms(
        kind in message_type(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let pool = emitted_atoms();
        let atoms: Vec<&str> = picks.iter().map(|i| pool[i.index(pool.len())].as_str()).collect();

        let vocabulary = vocabulary();
        let tokenizer = Tokenizer::new(LookupEngine::new(vocabulary, "en"));
        let encoded = Encoder::new(tokenizer, vocabulary).join(kind, &atoms);

        let tokens = translator().tokenize(&encoded);
        prop_assert_eq!(tokens[0].text.as_str(), kind.sigil());
        let body: Vec<&str> = tokens[1..]
            .iter()
            .map(|t| t.text.as_str())
            .filter(|text| *text != SEPARATOR)
            .collect();
        prop_assert_eq!(body, atoms, "encoded as {}", encoded);
    }
}

#[test]
fn every_atom_decodes_to_its_primary_sense() {
    let vocabulary = vocabulary();
    let lang = vocabulary.default_language();
    let translator = translator();

    let mut checked = 0;
    let mut check = |symbol: String, primary: &str| {
        let decoded = translator.decode(&symbol);
        assert!(
            decoded.contains(primary),
            "'{symbol}' decoded to '{decoded}', expected '{primary}'"
        );
        checked += 1;
    };

    for category in CoreCategory::ALL {
        for (code, glosses) in vocabulary.core_atoms(category) {
            check(code.to_string(), glosses.primary(lang, lang).unwrap());
        }
    }
    let tiers = vocabulary
        .extended_atoms()
        .chain(vocabulary.discourse_atoms())
        .chain(vocabulary.emotion_atoms());
    for (code, glosses) in tiers {
        check(code.to_string(), glosses.primary(lang, lang).unwrap());
    }
    for domain in vocabulary.domains() {
        for (code, glosses) in domain.atoms() {
            let primary = glosses.primary(lang, lang).unwrap();
            check(format!("{}:{code}", domain.prefix()), primary);
            check(format!("{}:{code}", domain.code()), primary);
        }
    }
    assert!(checked > 150);
}

#[test]
fn every_disambiguated_sense_is_reachable() {
    let vocabulary = vocabulary();
    let lang = vocabulary.default_language();
    for (atom, entry) in vocabulary.disambiguation().iter() {
        let primary = entry.primary().primary(lang, lang).unwrap();
        assert_eq!(translator().decode(atom), primary);
        for (marker, glosses) in entry.alternates() {
            let symbol = format!("{atom}{}", marker.suffix());
            assert_eq!(
                translator().decode(&symbol),
                glosses.primary(lang, lang).unwrap()
            );
        }
    }
}
