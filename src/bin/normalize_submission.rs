use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use surveybase::models::SubmissionPayload;
use surveybase::normalize::normalize_submission;

fn main() -> Result<()> {
    let args = CliArgs::parse()?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read payload {}", args.input.display()))?;
    let payload: SubmissionPayload = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid submission payload {}", args.input.display()))?;

    let normalized = normalize_submission(&payload);
    let data = serde_json::to_string_pretty(&normalized)?;
    fs::write(&args.output, data)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Normalized {} answers from submission {}",
        normalized.answers.len(),
        normalized.meta.submission_id
    );
    Ok(())
}

struct CliArgs {
    input: PathBuf,
    output: PathBuf,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut input = None;
        let mut output = None;
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" => {
                    let value = args
                        .next()
                        .context("Expected a payload path after --input")?;
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
            input: input.context(USAGE)?,
            output: output.context(USAGE)?,
        })
    }
}

const USAGE: &str =
    "Usage: cargo run --bin normalize_submission -- --input <payload.json> --output <normalized.json>";
