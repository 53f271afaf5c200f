use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use surveybase::alignment::parse_aligned_text;
use surveybase::reconstruction::{rebuild_submission, RebuildRequest};
use surveybase::schema::SurveySchema;

fn main() -> Result<()> {
    let args = CliArgs::parse()?;

    let schema = SurveySchema::load(&args.form)?;
    println!(
        "Loaded {} questions from {}",
        schema.len(),
        args.form.display()
    );

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read aligned text {}", args.input.display()))?;
    let parsed = parse_aligned_text(&text);
    for warning in &parsed.warnings {
        println!("Warning: {warning}");
    }
    println!("Parsed {} aligned records", parsed.records.len());

    let outcome = rebuild_submission(
        &schema,
        &parsed.records,
        RebuildRequest {
            submission_id: args.submission_id,
            hidden_metadata: args.hidden_metadata,
        },
    );
    for warning in &outcome.warnings {
        println!("Warning: {warning}");
    }

    let data = serde_json::to_string_pretty(&outcome.payload)?;
    fs::write(&args.output, data)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Built payload with {} answers at {}",
        outcome.payload.answers.len(),
        args.output.display()
    );
    Ok(())
}

struct CliArgs {
    form: PathBuf,
    input: PathBuf,
    output: PathBuf,
    submission_id: Option<String>,
    hidden_metadata: HashMap<String, String>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut form = None;
        let mut input = None;
        let mut output = None;
        let mut submission_id = None;
        let mut hidden_metadata = HashMap::new();
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
                        .context("Expected an aligned-text path after --input")?;
                    input = Some(PathBuf::from(value));
                }
                "--output" => {
                    let value = args
                        .next()
                        .context("Expected an output path after --output")?;
                    output = Some(PathBuf::from(value));
                }
                "--submission-id" => {
                    let value = args
                        .next()
                        .context("Expected an identifier after --submission-id")?;
                    submission_id = Some(value);
                }
                "--hidden" => {
                    let value = args
                        .next()
                        .context("Expected key=value after --hidden")?;
                    let (key, val) = value
                        .split_once('=')
                        .context("Expected key=value after --hidden")?;
                    hidden_metadata.insert(key.to_string(), val.to_string());
                }
                other => anyhow::bail!("Unknown argument {other}"),
            }
        }
        Ok(Self {
            form: form.context(USAGE)?,
            input: input.context(USAGE)?,
            output: output.context(USAGE)?,
            submission_id,
            hidden_metadata,
        })
    }
}

const USAGE: &str =
    "Usage: cargo run --bin rebuild_submission -- --form <schema.json> --input <aligned.txt> --output <payload.json> [--submission-id <id>] [--hidden key=value]";
