use anyhow::Result;
use lambda_translator::{Session, Translator};
use std::io::{BufRead, Write};

use crate::report;

const PROMPT: &str = "λ> ";

const HELP: &str = "\
<symbols>        decode
en <text>        encode
vocab [domain]   vocabulary summary or one domain
domain <code>    keep a domain active for this session
domains          list active domains
clear            deactivate all domains
quit             leave";

/// Interactive loop. Owns the only session that outlives a single line.
pub(crate) struct Repl<'t> {
    translator: &'t Translator,
    session: Session,
}

impl<'t> Repl<'t> {
    pub(crate) fn new(translator: &'t Translator) -> Self {
        Self {
            translator,
            session: Session::new(),
        }
    }

    pub(crate) fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "Lambda {} (type 'help')", self.translator.vocabulary().version())?;
        write!(output, "{PROMPT}")?;
        output.flush()?;
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if matches!(line, "quit" | "exit" | "q") {
                break;
            }
            if !line.is_empty() {
                writeln!(output, "{}", self.respond(line))?;
            }
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn respond(&mut self, line: &str) -> String {
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, rest)| (command, rest.trim()));
        let vocabulary = self.translator.vocabulary();
        let lang = self.translator.config().language.as_str();

        match command {
            "help" => HELP.to_string(),
            "en" => self.translator.encode(rest),
            "vocab" if rest.is_empty() => {
                report::render_summary(vocabulary, &vocabulary.summary(), lang)
            }
            "vocab" => match vocabulary.domain(vocabulary.resolver().resolve(rest)) {
                Some(domain) => {
                    report::render_domain(&report::domain_table(vocabulary, domain, lang))
                }
                None => format!("Unknown domain '{rest}'"),
            },
            "domain" => {
                let code = vocabulary.resolver().resolve(rest);
                if vocabulary.domain(code).is_none() {
                    return format!("Unknown domain '{rest}'");
                }
                self.session.activate(code);
                format!("Active domains: {}", self.session.active_domains().join(", "))
            }
            "domains" if self.session.active_domains().is_empty() => "No active domains".to_string(),
            "domains" => format!("Active domains: {}", self.session.active_domains().join(", ")),
            "clear" => {
                self.session.clear_domains();
                "No active domains".to_string()
            }
            _ => self.translator.decode_with(line, &self.session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_translator::TranslatorConfig;
    use pretty_assertions::assert_eq;

    fn transcript(lines: &str) -> Vec<String> {
        let translator = Translator::builtin(TranslatorConfig::default()).unwrap();
        let mut out = Vec::new();
        Repl::new(&translator).run(lines.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .split(PROMPT)
            .skip(1)
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }

    #[test]
    fn decodes_and_encodes_lines() {
        assert_eq!(
            transcript("!Ik\nen I think therefore I exist\nquit\n!Ik\n"),
            ["(assertion) I know", "!It>Ie"]
        );
    }

    #[test]
    fn domains_persist_across_lines() {
        assert_eq!(
            transcript("ty\ndomain s\nty\ndomains\nclear\nty\ndomain zz\n"),
            [
                "type",
                "Active domains: sc",
                "theory",
                "Active domains: sc",
                "No active domains",
                "type",
                "Unknown domain 'zz'",
            ]
        );
    }

    #[test]
    fn inline_context_does_not_persist() {
        assert_eq!(transcript("@sty\nty\n"), ["theory", "type"]);
    }
}
