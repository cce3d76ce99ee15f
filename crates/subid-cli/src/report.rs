//! Classification of one input document and rendering of the outcome.

use serde_json::{Value, json};
use subid_core::Format;
use thiserror::Error;

use crate::settings::OutputMode;

#[derive(Debug, Error)]
pub enum Rejection {
  #[error("no value at pointer {0:?}")]
  PointerNotFound(String),

  #[error(transparent)]
  Invalid(#[from] subid_core::Error),
}

/// The outcome for a single input document.
#[derive(Debug)]
pub struct Report {
  pub source:  String,
  pub outcome: Result<Format, Rejection>,
}

impl Report {
  /// Classify `document`, or the value `pointer` selects within it.
  pub fn examine(
    source: impl Into<String>,
    document: &Value,
    pointer: Option<&str>,
  ) -> Self {
    let outcome = match pointer {
      Some(pointer) => document
        .pointer(pointer)
        .ok_or_else(|| Rejection::PointerNotFound(pointer.to_string()))
        .and_then(|value| {
          subid_core::validate(value).map_err(Rejection::from)
        }),
      None => subid_core::validate(document).map_err(Rejection::from),
    };

    Self {
      source: source.into(),
      outcome,
    }
  }

  pub fn render(&self, mode: OutputMode) -> String {
    match (mode, &self.outcome) {
      (OutputMode::Text, Ok(format)) => format!("{}: {format}", self.source),
      (OutputMode::Text, Err(err)) => {
        format!("{}: rejected: {err}", self.source)
      }
      (OutputMode::Json, Ok(format)) => json!({
        "source": self.source,
        "valid":  true,
        "format": format,
      })
      .to_string(),
      (OutputMode::Json, Err(err)) => json!({
        "source": self.source,
        "valid":  false,
        "error":  err.to_string(),
      })
      .to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn token_payload() -> Value {
    json!({
      "iss": "https://transmitter.example.com",
      "sub_id": {
        "format": "aliases",
        "identifiers": [
          { "format": "email", "email": "alice@example.com" },
          { "format": "did", "url": "did:example:123" },
        ],
      },
    })
  }

  #[test]
  fn examines_the_whole_document() {
    let doc = json!({ "format": "opaque", "id": "abc" });
    let report = Report::examine("doc.json", &doc, None);
    assert!(report.outcome.is_ok());
    assert_eq!(report.render(OutputMode::Text), "doc.json: opaque");
  }

  #[test]
  fn follows_the_pointer() {
    let report = Report::examine("set.json", &token_payload(), Some("/sub_id"));
    assert!(matches!(report.outcome, Ok(Format::Aliases)));
  }

  #[test]
  fn missing_pointer_target_is_a_rejection() {
    let report = Report::examine("set.json", &token_payload(), Some("/nope"));
    assert!(matches!(report.outcome, Err(Rejection::PointerNotFound(_))));
    assert_eq!(
      report.render(OutputMode::Text),
      "set.json: rejected: no value at pointer \"/nope\"",
    );
  }

  #[test]
  fn renders_json_lines() {
    let report = Report::examine("-", &json!({ "format": "email" }), None);
    let line: Value =
      serde_json::from_str(&report.render(OutputMode::Json)).unwrap();
    assert_eq!(line["source"], "-");
    assert_eq!(line["valid"], false);
    assert_eq!(
      line["error"],
      "email identifier is missing attribute `email`"
    );

    let report = Report::examine("set.json", &token_payload(), Some("/sub_id"));
    let line: Value =
      serde_json::from_str(&report.render(OutputMode::Json)).unwrap();
    assert_eq!(line["valid"], true);
    assert_eq!(line["format"], "aliases");
  }
}
