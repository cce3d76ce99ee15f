//! Error types for `subid-core`.
//!
//! The predicates in [`crate::classify`] never surface these; they only
//! appear from the diagnostic and narrowing entry points.

use thiserror::Error;

use crate::format::Format;

#[derive(Debug, Error)]
pub enum Error {
  #[error("subject identifier must be a JSON object")]
  NotAnObject,

  #[error("subject identifier has no `format` attribute")]
  MissingFormat,

  #[error("`format` attribute must be a string")]
  FormatNotAString,

  #[error("unknown identifier format: {0:?}")]
  UnknownFormat(String),

  #[error("expected format \"{expected}\", found {found:?}")]
  WrongFormat { expected: Format, found: String },

  #[error("{format} identifier is missing attribute `{attribute}`")]
  MissingAttribute {
    format:    Format,
    attribute: &'static str,
  },

  #[error("{format} identifier attribute `{attribute}` must be a string")]
  NotAString {
    format:    Format,
    attribute: &'static str,
  },

  #[error("aliases identifier `identifiers` must be an array")]
  IdentifiersNotAnArray,

  #[error("aliases identifiers cannot be nested")]
  NestedAliases,

  #[error("identifiers[{index}]: {source}")]
  InvalidAlias { index: usize, source: Box<Error> },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
