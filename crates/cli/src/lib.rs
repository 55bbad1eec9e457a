use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use lambda_protocol::{schema_json, serialize_json, ErrorEnvelope, LambdaMessage};
use lambda_translator::{CompressionStats, TierStats, Translator, TranslatorError};
use lambda_vocabulary::VocabularyError;
use serde::Serialize;
use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::flags::{MessageTypeFlag, SchemaKind};

mod config;
mod flags;
mod repl;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "lambda")]
#[command(about = "Translate between Lambda symbol notation and natural-language glosses", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Print machine-readable JSON (implies --quiet)
    #[arg(long, global = true)]
    json: bool,

    /// Vocabulary file, JSON or TOML (overrides LAMBDA_VOCAB_PATH)
    #[arg(long, global = true)]
    vocab: Option<PathBuf>,

    /// Gloss language (overrides LAMBDA_LANG and the config file)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Translator config file, JSON or TOML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Omit the "(type)" label from decoded output
    #[arg(long, global = true)]
    no_label: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode symbols into a gloss
    Decode(TextArgs),

    /// Encode natural language into symbols
    Encode(EncodeArgs),

    /// Show how each token is read
    Parse(TextArgs),

    /// Tier coverage and compression of a message
    Tiers(TextArgs),

    /// List vocabulary contents
    Vocab(VocabArgs),

    /// Wrap a message in the agent exchange envelope
    Envelope(EnvelopeArgs),

    /// Print the JSON schema of exchanged payloads
    Schema(SchemaArgs),

    /// Line-by-line translation session
    Interactive,
}

#[derive(Args)]
struct TextArgs {
    /// Input text; read from stdin when omitted
    text: Vec<String>,
}

#[derive(Args)]
struct EncodeArgs {
    #[command(flatten)]
    input: TextArgs,

    /// Message type to emit instead of the detected one
    #[arg(long = "type", value_enum)]
    message_type: Option<MessageTypeFlag>,
}

#[derive(Args)]
struct VocabArgs {
    /// Show one domain's atoms (code or alias)
    #[arg(long, conflicts_with = "disambig")]
    domain: Option<String>,

    /// Show the disambiguation table
    #[arg(long)]
    disambig: bool,
}

#[derive(Args)]
struct EnvelopeArgs {
    #[command(flatten)]
    input: TextArgs,

    /// Treat the input as natural language and encode it first
    #[arg(long)]
    from_english: bool,
}

#[derive(Args)]
struct SchemaArgs {
    #[arg(value_enum, default_value_t)]
    kind: SchemaKind,
}

#[derive(Serialize)]
struct TranslationOutput<'a> {
    input: &'a str,
    output: String,
}

#[derive(Serialize)]
struct TiersOutput<'a> {
    input: &'a str,
    tiers: TierStats,
    compression: CompressionStats,
    ratio: f64,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let json = cli.json;
    match run(cli) {
        Ok(()) => Ok(()),
        Err(err) if json => {
            print_stdout(&serialize_json(&error_envelope(&err))?)?;
            std::process::exit(1);
        }
        Err(err) => Err(err),
    }
}

fn run(cli: Cli) -> Result<()> {
    let translator = load_translator(&cli)?;
    match cli.command {
        Commands::Decode(args) => run_decode(&translator, &args, cli.json),
        Commands::Encode(args) => run_encode(&translator, &args, cli.json),
        Commands::Parse(args) => run_parse(&translator, &args, cli.json),
        Commands::Tiers(args) => run_tiers(&translator, &args, cli.json),
        Commands::Vocab(args) => run_vocab(&translator, &args, cli.json),
        Commands::Envelope(args) => run_envelope(&translator, &args),
        Commands::Schema(args) => run_schema(args.kind),
        Commands::Interactive => {
            let stdin = io::stdin();
            repl::Repl::new(&translator).run(stdin.lock(), io::stdout().lock())
        }
    }
}

fn load_translator(cli: &Cli) -> Result<Translator> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Default::default(),
    };
    if let Some(lang) = cli.lang.clone().or_else(|| env::var("LAMBDA_LANG").ok()) {
        config.language = lang;
    }
    if cli.no_label {
        config.emit_type_label = false;
    }

    let vocab_path = cli
        .vocab
        .clone()
        .or_else(|| env::var_os("LAMBDA_VOCAB_PATH").map(PathBuf::from));
    let translator = match vocab_path {
        Some(path) => Translator::from_vocabulary_file(&path, config)
            .with_context(|| format!("Failed to load vocabulary from {}", path.display()))?,
        None => Translator::builtin(config)?,
    };
    log::debug!(
        "Vocabulary {} loaded, glossing in '{}'",
        translator.vocabulary().version(),
        translator.config().language
    );
    Ok(translator)
}

fn read_input(args: &TextArgs) -> Result<String> {
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read input from stdin")?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

fn print_translation(input: &str, output: String, json: bool) -> Result<()> {
    if json {
        print_stdout(&serialize_json(&TranslationOutput { input, output })?)
    } else {
        print_stdout(&output)
    }
}

fn run_decode(translator: &Translator, args: &TextArgs, json: bool) -> Result<()> {
    let input = read_input(args)?;
    let output = translator.decode(&input);
    print_translation(&input, output, json)
}

fn run_encode(translator: &Translator, args: &EncodeArgs, json: bool) -> Result<()> {
    let input = read_input(&args.input)?;
    let output = match args.message_type {
        Some(flag) => translator.encode_as(&input, flag.as_domain()),
        None => translator.encode(&input),
    };
    print_translation(&input, output, json)
}

fn run_parse(translator: &Translator, args: &TextArgs, json: bool) -> Result<()> {
    let input = read_input(args)?;
    let reports = translator.explain(&input);
    if json {
        print_stdout(&serialize_json(&reports)?)
    } else {
        print_stdout(&report::render_tokens(&reports))
    }
}

fn run_tiers(translator: &Translator, args: &TextArgs, json: bool) -> Result<()> {
    let input = read_input(args)?;
    let tiers = translator.classify_tiers(&input);
    let compression = translator.compression(&input);
    if json {
        let out = TiersOutput {
            input: &input,
            tiers,
            compression,
            ratio: compression.ratio(),
        };
        print_stdout(&serialize_json(&out)?)
    } else {
        print_stdout(&report::render_tiers(&tiers, &compression))
    }
}

fn run_vocab(translator: &Translator, args: &VocabArgs, json: bool) -> Result<()> {
    let vocabulary = translator.vocabulary();
    let lang = translator.config().language.as_str();

    if let Some(code) = &args.domain {
        let resolved = vocabulary.resolver().resolve(code);
        let domain = vocabulary
            .domain(resolved)
            .with_context(|| format!("Unknown domain '{code}'"))?;
        let table = report::domain_table(vocabulary, domain, lang);
        return if json {
            print_stdout(&serialize_json(&table)?)
        } else {
            print_stdout(&report::render_domain(&table))
        };
    }

    if args.disambig {
        let rows = report::disambiguation_rows(vocabulary, lang);
        return if json {
            print_stdout(&serialize_json(&rows)?)
        } else {
            print_stdout(&report::render_disambiguation(&rows))
        };
    }

    let summary = vocabulary.summary();
    if json {
        print_stdout(&serialize_json(&summary)?)
    } else {
        print_stdout(&report::render_summary(vocabulary, &summary, lang))
    }
}

fn run_envelope(translator: &Translator, args: &EnvelopeArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let lambda = if args.from_english {
        translator.encode(&input)
    } else {
        input
    };
    let english = translator.decode(&lambda);
    let message =
        LambdaMessage::new(lambda, english).with_version(translator.vocabulary().version());
    print_stdout(&message.to_json()?)
}

fn run_schema(kind: SchemaKind) -> Result<()> {
    let schema = match kind {
        SchemaKind::Message => schema_json::<LambdaMessage>()?,
        SchemaKind::Error => schema_json::<ErrorEnvelope>()?,
    };
    print_stdout(&schema)
}

fn error_envelope(err: &anyhow::Error) -> ErrorEnvelope {
    let code = err
        .chain()
        .find_map(|cause| {
            if let Some(err) = cause.downcast_ref::<TranslatorError>() {
                return Some(match err {
                    TranslatorError::InvalidConfig(_) => "invalid_config",
                    TranslatorError::Vocabulary(err) => vocabulary_error_code(err),
                });
            }
            cause.downcast_ref::<VocabularyError>().map(vocabulary_error_code)
        })
        .unwrap_or("invalid_request");
    let envelope = ErrorEnvelope::new(code, format!("{err:#}"));
    match code {
        "invalid_config" => envelope.with_hint("Check the --config file and --lang value."),
        "vocabulary_unreadable" | "invalid_vocabulary" => envelope.with_hint(
            "Check --vocab / LAMBDA_VOCAB_PATH, or unset it to use the bundled vocabulary.",
        ),
        _ => envelope,
    }
}

fn vocabulary_error_code(err: &VocabularyError) -> &'static str {
    match err {
        VocabularyError::Io { .. } => "vocabulary_unreadable",
        _ => "invalid_vocabulary",
    }
}
