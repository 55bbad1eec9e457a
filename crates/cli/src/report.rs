use lambda_translator::{CompressionStats, Tier, TierStats, TokenReport};
use lambda_vocabulary::{Domain, Glosses, Vocabulary, VocabularySummary};
use serde::Serialize;

/// Extended atoms listed in the summary before eliding the rest.
const EXTENDED_SAMPLE: usize = 12;

#[derive(Debug, Serialize)]
pub(crate) struct AtomRow {
    pub atom: String,
    pub senses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DomainTable {
    pub code: String,
    pub alias: Option<String>,
    pub name: String,
    pub atoms: Vec<AtomRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DisambiguationRow {
    pub atom: String,
    pub symbol: String,
    pub senses: Vec<String>,
}

fn senses(vocabulary: &Vocabulary, glosses: &Glosses, lang: &str) -> Vec<String> {
    glosses.senses(lang, vocabulary.default_language()).to_vec()
}

pub(crate) fn domain_table(vocabulary: &Vocabulary, domain: &Domain, lang: &str) -> DomainTable {
    let name = domain
        .name()
        .primary(lang, vocabulary.default_language())
        .unwrap_or(domain.code());
    DomainTable {
        code: domain.code().to_string(),
        alias: domain.alias().map(str::to_string),
        name: name.to_string(),
        atoms: domain
            .atoms()
            .map(|(code, glosses)| AtomRow {
                atom: format!("{}:{code}", domain.prefix()),
                senses: senses(vocabulary, glosses, lang),
            })
            .collect(),
    }
}

/// Primary row first, then one row per marker.
pub(crate) fn disambiguation_rows(vocabulary: &Vocabulary, lang: &str) -> Vec<DisambiguationRow> {
    let mut rows = Vec::new();
    for (atom, entry) in vocabulary.disambiguation().iter() {
        rows.push(DisambiguationRow {
            atom: atom.to_string(),
            symbol: atom.to_string(),
            senses: senses(vocabulary, entry.primary(), lang),
        });
        for (marker, glosses) in entry.alternates() {
            rows.push(DisambiguationRow {
                atom: atom.to_string(),
                symbol: format!("{atom}{}", marker.suffix()),
                senses: senses(vocabulary, glosses, lang),
            });
        }
    }
    rows
}

pub(crate) fn render_tokens(reports: &[TokenReport]) -> String {
    let mut out = String::new();
    out.push_str("| token | kind | senses |\n");
    out.push_str("|---|---|---|\n");
    for report in reports {
        let senses = if report.senses.is_empty() {
            format!("({})", report.kind)
        } else {
            report.senses.join(", ")
        };
        out.push_str(&format!(
            "| `{}` | {} | {} |\n",
            escape_cell(&report.token),
            report.kind,
            escape_cell(&senses)
        ));
    }
    out.trim_end().to_string()
}

pub(crate) fn render_tiers(stats: &TierStats, compression: &CompressionStats) -> String {
    let mut out = String::new();
    out.push_str("| tier | count | share |\n");
    out.push_str("|---|---:|---:|\n");
    let rows = [
        ("tier0 (core)", Tier::Core),
        ("tier1 (extended)", Tier::Extended),
        ("tier2 (domain)", Tier::Domain),
        ("unknown", Tier::Unknown),
    ];
    for (label, tier) in rows {
        out.push_str(&format!(
            "| {label} | {} | {:.1}% |\n",
            stats.count(tier),
            stats.percentage(tier)
        ));
    }
    out.push_str(&format!("| total | {} | |\n\n", stats.total));
    out.push_str(&format!(
        "Compression: {} symbol chars -> {} gloss chars ({:.2}x)",
        compression.symbol_chars,
        compression.gloss_chars,
        compression.ratio()
    ));
    out
}

pub(crate) fn render_summary(
    vocabulary: &Vocabulary,
    summary: &VocabularySummary,
    lang: &str,
) -> String {
    let mut md = String::new();
    md.push_str(&format!(
        "# Lambda vocabulary {} (default language: {})\n\n",
        summary.version, summary.default_language
    ));

    md.push_str("## Core\n\n");
    for category in &summary.core {
        md.push_str(&format!(
            "- {}: {}\n",
            category.category.source_key(),
            category.atoms.join(" ")
        ));
    }

    md.push_str(&format!("\n## Extended ({})\n\n", summary.extended));
    let mut sample: Vec<String> = vocabulary
        .extended_atoms()
        .take(EXTENDED_SAMPLE)
        .map(|(code, glosses)| {
            let primary = glosses
                .primary(lang, vocabulary.default_language())
                .unwrap_or_default();
            format!("{code}={primary}")
        })
        .collect();
    if summary.extended > EXTENDED_SAMPLE {
        sample.push("...".to_string());
    }
    md.push_str(&sample.join(", "));
    md.push_str(&format!(
        "\n\nDiscourse markers: {}, emotion markers: {}\n\n",
        summary.discourse, summary.emotion
    ));

    md.push_str("## Domains\n\n");
    md.push_str("| code | alias | name | atoms |\n");
    md.push_str("|---|---|---|---:|\n");
    for domain in &summary.domains {
        md.push_str(&format!(
            "| `{}` | `{}` | {} | {} |\n",
            domain.code,
            domain.alias.as_deref().unwrap_or("-"),
            domain.name,
            domain.atoms
        ));
    }

    md.push_str(&format!(
        "\nDisambiguation entries: {}\nEncoder words: {}",
        summary.disambiguation, summary.encoder_words
    ));
    md
}

pub(crate) fn render_domain(table: &DomainTable) -> String {
    let mut md = String::new();
    match &table.alias {
        Some(alias) => md.push_str(&format!(
            "# Domain `{}` ({}, alias `{alias}`)\n\n",
            table.code, table.name
        )),
        None => md.push_str(&format!("# Domain `{}` ({})\n\n", table.code, table.name)),
    }
    md.push_str("| atom | senses |\n");
    md.push_str("|---|---|\n");
    for row in &table.atoms {
        md.push_str(&format!(
            "| `{}` | {} |\n",
            row.atom,
            escape_cell(&row.senses.join(", "))
        ));
    }
    md.trim_end().to_string()
}

pub(crate) fn render_disambiguation(rows: &[DisambiguationRow]) -> String {
    let mut md = String::new();
    md.push_str("| symbol | senses |\n");
    md.push_str("|---|---|\n");
    for row in rows {
        md.push_str(&format!(
            "| `{}` | {} |\n",
            escape_cell(&row.symbol),
            escape_cell(&row.senses.join(", "))
        ));
    }
    md.trim_end().to_string()
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
