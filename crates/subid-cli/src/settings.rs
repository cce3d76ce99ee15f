//! Layered CLI settings: TOML file, then `SUBID_*` environment variables,
//! then command-line flags (applied by the caller).

use std::path::Path;

use anyhow::Context as _;
use config::FileFormat;
use serde::Deserialize;

/// How each classification result is printed.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
  /// `<source>: <format>` or `<source>: rejected: <reason>`.
  #[default]
  Text,
  /// One JSON object per line.
  Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub output:  OutputMode,
  /// JSON pointer (RFC 6901) selecting the identifier inside each document.
  pub pointer: Option<String>,
}

impl Settings {
  /// Load settings from the TOML file at `path` (optional, any extension)
  /// and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let file = config::File::new(&path.to_string_lossy(), FileFormat::Toml)
      .required(false);
    let settings = config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("SUBID"))
      .build()
      .with_context(|| {
        format!("failed to load settings from {path:?} or SUBID_* variables")
      })?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// Overlay command-line flags; a flag that was given always wins.
  pub fn apply(
    mut self,
    output: Option<OutputMode>,
    pointer: Option<String>,
  ) -> Self {
    if let Some(output) = output {
      self.output = output;
    }
    if pointer.is_some() {
      self.pointer = pointer;
    }
    self
  }
}

#[cfg(test)]
pub(crate) mod test_helpers {
  use std::path::PathBuf;

  /// Write `contents` to a file unique to this test process.
  pub(crate) fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir()
      .join(format!("subid-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write scratch file");
    path
  }
}
