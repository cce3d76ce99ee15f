//! `subid`: classify JSON subject identifiers from files or stdin.
//!
//! Each input is one JSON document. The exit status is non-zero if any
//! document fails to classify.
//!
//! ```text
//! subid --pointer /sub_id token-payload.json
//! echo '{"format":"email","email":"a@example.com"}' | subid --output json
//! ```

mod report;
mod settings;

use std::{
  io::{self, Read, Write},
  path::{Path, PathBuf},
  process::ExitCode,
};

use anyhow::Context as _;
use clap::Parser;
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{
  report::Report,
  settings::{OutputMode, Settings},
};

#[derive(Parser)]
#[command(author, version, about = "Classify security event subject identifiers")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "subid.toml")]
  config: PathBuf,

  /// Output format; overrides the configured value.
  #[arg(short, long, value_enum)]
  output: Option<OutputMode>,

  /// JSON pointer to the identifier inside each document, e.g. `/sub_id`.
  #[arg(short, long)]
  pointer: Option<String>,

  /// Input files; `-` or none reads stdin.
  files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)?.apply(cli.output, cli.pointer);
  tracing::debug!(?settings, "loaded settings");

  let all_valid =
    run(&settings, &cli.files, &mut io::stdin().lock(), &mut io::stdout())?;

  Ok(if all_valid {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}

/// Classify every source and print one report line each.
///
/// Returns `true` when every document classifies. No sources means stdin.
fn run(
  settings: &Settings,
  sources: &[PathBuf],
  stdin: &mut impl Read,
  out: &mut impl Write,
) -> anyhow::Result<bool> {
  let stdin_only = [PathBuf::from("-")];
  let sources = if sources.is_empty() {
    &stdin_only[..]
  } else {
    sources
  };

  let mut all_valid = true;
  for source in sources {
    let document = read_document(source, stdin)?;
    let report = Report::examine(
      source.display().to_string(),
      &document,
      settings.pointer.as_deref(),
    );
    if let Err(err) = &report.outcome {
      tracing::info!(source = %source.display(), %err, "rejected");
      all_valid = false;
    }
    writeln!(out, "{}", report.render(settings.output))
      .context("failed to write report")?;
  }
  Ok(all_valid)
}

/// Read and parse one JSON document from `path`, or from `stdin` for `-`.
fn read_document(path: &Path, stdin: &mut impl Read) -> anyhow::Result<Value> {
  let text = if path == Path::new("-") {
    let mut buf = String::new();
    stdin
      .read_to_string(&mut buf)
      .context("failed to read stdin")?;
    buf
  } else {
    std::fs::read_to_string(path)
      .with_context(|| format!("failed to read {path:?}"))?
  };

  serde_json::from_str(&text)
    .with_context(|| format!("{path:?} is not valid JSON"))
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn cli_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn parses_flags_and_files() {
    let cli = Cli::parse_from([
      "subid", "--output", "json", "--pointer", "/sub_id", "a.json", "b.json",
    ]);
    assert_eq!(cli.output, Some(OutputMode::Json));
    assert_eq!(cli.pointer.as_deref(), Some("/sub_id"));
    assert_eq!(cli.files.len(), 2);
    assert_eq!(cli.config, PathBuf::from("subid.toml"));
  }
}

#[cfg(test)]
mod run_tests {
  use std::io::Cursor;

  use super::*;
  use crate::settings::test_helpers::scratch_file;

  fn run_to_string(
    settings: &Settings,
    sources: &[PathBuf],
    stdin: &str,
  ) -> (anyhow::Result<bool>, String) {
    let mut out = Vec::new();
    let result = run(settings, sources, &mut Cursor::new(stdin), &mut out);
    (result, String::from_utf8(out).unwrap())
  }

  #[test]
  fn all_accepted_documents_succeed() {
    let (result, out) = run_to_string(
      &Settings::default(),
      &[],
      r#"{ "format": "email", "email": "alice@example.com" }"#,
    );
    assert!(result.unwrap());
    assert_eq!(out, "-: email\n");
  }

  #[test]
  fn one_rejected_document_fails_the_run() {
    let good = scratch_file(
      "good.json",
      r#"{ "format": "opaque", "id": "abc" }"#,
    );
    let bad = scratch_file(
      "bad.json",
      r#"{ "format": "aliases", "identifiers": [{ "format": "aliases", "identifiers": [] }] }"#,
    );

    let (result, out) =
      run_to_string(&Settings::default(), &[good.clone(), bad.clone()], "");
    assert!(!result.unwrap());

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{}: opaque", good.display()));
    assert_eq!(
      lines[1],
      format!(
        "{}: rejected: identifiers[0]: aliases identifiers cannot be nested",
        bad.display()
      ),
    );
  }

  #[test]
  fn settings_pointer_and_output_are_used() {
    let settings = Settings::default()
      .apply(Some(OutputMode::Json), Some("/sub_id".to_string()));
    let (result, out) = run_to_string(
      &settings,
      &[PathBuf::from("-")],
      r#"{ "sub_id": { "format": "email", "email": "alice@example.com" } }"#,
    );
    assert!(result.unwrap());
    let line: Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(line["source"], "-");
    assert_eq!(line["valid"], true);
    assert_eq!(line["format"], "email");
  }

  #[test]
  fn invalid_json_is_an_error_with_context() {
    let err = read_document(Path::new("-"), &mut Cursor::new("{ not json"))
      .unwrap_err();
    assert_eq!(err.to_string(), "\"-\" is not valid JSON");
    assert_eq!(err.chain().count(), 2);
  }

  #[test]
  fn unreadable_file_is_an_error_with_context() {
    let path = PathBuf::from("/nonexistent/subid-input.json");
    let (result, out) = run_to_string(&Settings::default(), &[path], "");
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("failed to read"), "{err}");
    assert!(out.is_empty());
  }
}
