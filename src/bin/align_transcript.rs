use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use surveybase::alignment::{align_transcript, export_aligned_text};
use surveybase::config;
use surveybase::schema::SurveySchema;
use surveybase::transcript;

fn main() -> Result<()> {
    let args = CliArgs::parse()?;
    let settings = config::load_or_default()?.alignment;

    let schema = SurveySchema::load(&args.form)?;
    println!(
        "Loaded {} questions from {}",
        schema.len(),
        args.form.display()
    );

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read transcription {}", args.input.display()))?;
    let outcome = align_transcript(&schema, transcript::blocks(&text), &settings);

    fs::write(&args.output, export_aligned_text(&outcome.matched))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Exported {} aligned answers to {}",
        outcome.matched.len(),
        args.output.display()
    );

    let summary = outcome.summary();
    println!(
        "Matches: {} exact, {} fuzzy, {} unmatched",
        summary.exact, summary.fuzzy, summary.unmatched
    );
    if !outcome.unmatched.is_empty() {
        println!("Unmatched questions:");
        for block in outcome.unmatched.iter().take(5) {
            println!("  - {}", block.question);
        }
        if outcome.unmatched.len() > 5 {
            println!("  ...");
        }
    }
    Ok(())
}

struct CliArgs {
    form: PathBuf,
    input: PathBuf,
    output: PathBuf,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut form = None;
        let mut input = None;
        let mut output = None;
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--form" => {
                    let value = args.next().context("Expected a schema path after --form")?;
                    form = Some(PathBuf::from(value));
                }
                "--input" => {
                    let value = args
                        .next()
                        .context("Expected a transcription path after --input")?;
                    input = Some(PathBuf::from(value));
                }
                "--output" => {
                    let value = args
                        .next()
                        .context("Expected an output path after --output")?;
                    output = Some(PathBuf::from(value));
                }
                other => anyhow::bail!("Unknown argument {other}"),
            }
        }
        Ok(Self {
            form: form.context(USAGE)?,
            input: input.context(USAGE)?,
            output: output.context(USAGE)?,
        })
    }
}

const USAGE: &str =
    "Usage: cargo run --bin align_transcript -- --form <schema.json> --input <transcription.txt> --output <aligned.txt>";
