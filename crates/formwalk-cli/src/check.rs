//! # Check Subcommand
//!
//! Loads a declarative form file, reads one submission and prints the
//! resulting [`ValidationReport`](formwalk_form::ValidationReport) as
//! pretty JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use formwalk_core::FormInput;
use formwalk_form::{FormDefinition, FormDocument, FormSession};

use crate::{EXIT_INVALID, EXIT_VALID};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Declarative form file (YAML, or JSON with a `.json` extension).
    #[arg(long)]
    pub schema: PathBuf,

    /// Submission to validate. `-` reads standard input.
    #[arg(long)]
    pub input: PathBuf,

    /// Submission format. Inferred from the input extension when omitted.
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Write the report here instead of standard output.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// How a submission file is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// A JSON object; nested objects become nested fields.
    Json,
    /// A YAML mapping, read the same way as JSON.
    Yaml,
    /// An `application/x-www-form-urlencoded` body with bracket keys.
    Urlencoded,
}

impl InputFormat {
    /// `.json` and `.yaml`/`.yml` by extension; anything else is treated as
    /// a urlencoded body.
    pub fn infer(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => InputFormat::Json,
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Urlencoded,
        }
    }
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let document = FormDocument::load(&args.schema)?;
    let form = document
        .build()
        .with_context(|| format!("form file {} is invalid", args.schema.display()))?;

    let format = args
        .input_format
        .unwrap_or_else(|| InputFormat::infer(&args.input));
    let input = read_input(&args.input, format)?;
    if !form.is_own_submission(&input) {
        tracing::info!(form = form.name(), "submission has no top-level key named after the form");
    }

    let mut session = FormSession::new(form);
    let valid = session.validate(input).is_some();
    let report = session.report();
    for (path, errors) in report.errors.flatten() {
        tracing::info!(field = %path, errors = errors.len(), "field failed");
    }

    let rendered = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    match &args.output {
        Some(path) => std::fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(if valid { EXIT_VALID } else { EXIT_INVALID })
}

/// Read and decode a submission.
pub fn read_input(path: &Path, format: InputFormat) -> Result<FormInput> {
    let source = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read submission from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read submission: {}", path.display()))?
    };
    parse_input(&source, format).with_context(|| format!("invalid submission: {}", path.display()))
}

/// Decode a submission held in memory.
pub fn parse_input(source: &str, format: InputFormat) -> Result<FormInput> {
    let input = match format {
        InputFormat::Urlencoded => FormInput::from_urlencoded(source),
        InputFormat::Json => FormInput::from_json(serde_json::from_str(source)?)?,
        InputFormat::Yaml => {
            let value: serde_json::Value = serde_yaml::from_str(source)?;
            FormInput::from_json(value)?
        }
    };
    tracing::debug!(?format, fields = input.leaf_count(), "decoded submission");
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwalk_core::FieldPath;

    #[test]
    fn infer_by_extension() {
        assert_eq!(InputFormat::infer(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::infer(Path::new("a.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::infer(Path::new("a.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::infer(Path::new("body.txt")), InputFormat::Urlencoded);
        assert_eq!(InputFormat::infer(Path::new("-")), InputFormat::Urlencoded);
    }

    #[test]
    fn formats_decode_to_the_same_input() {
        let json = parse_input(r#"{"user": {"name": "ada", "tags": ["x", "y"]}}"#, InputFormat::Json).unwrap();
        let yaml = parse_input("user:\n  name: ada\n  tags: [x, y]\n", InputFormat::Yaml).unwrap();
        let form = parse_input("user[name]=ada&user[tags][]=x&user[tags][]=y", InputFormat::Urlencoded).unwrap();
        assert_eq!(json, yaml);
        assert_eq!(json, form);
        assert_eq!(json.text_at(&FieldPath::parse("user[tags][1]")), Some("y"));
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(parse_input("[1, 2]", InputFormat::Json).is_err());
        assert!(parse_input("{not json", InputFormat::Json).is_err());
    }
}
