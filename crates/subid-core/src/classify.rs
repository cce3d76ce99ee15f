//! Format predicates and rejection diagnostics.
//!
//! Every `is_*` predicate is total over [`Value`]: it answers `false` for
//! anything it does not recognise and never fails. The `validate*` functions
//! run the same checks but report the first reason for rejection, in the
//! order shape → `format` tag → attribute types.
//!
//! The aliases check only ever consults the seven leaf formats, so an aliases
//! identifier nested inside another is always rejected.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::{
  error::{Error, Result},
  format::{FORMAT_ATTRIBUTE, Format},
  shape::{has_attributes, missing_attribute, string_attribute},
};

// ─── Predicates ──────────────────────────────────────────────────────────────

pub fn is_account_identifier(value: &Value) -> bool {
  is_format(value, Format::Account)
}

pub fn is_email_identifier(value: &Value) -> bool {
  is_format(value, Format::Email)
}

pub fn is_iss_sub_identifier(value: &Value) -> bool {
  is_format(value, Format::IssSub)
}

pub fn is_opaque_identifier(value: &Value) -> bool {
  is_format(value, Format::Opaque)
}

pub fn is_phone_number_identifier(value: &Value) -> bool {
  is_format(value, Format::PhoneNumber)
}

pub fn is_did_identifier(value: &Value) -> bool {
  is_format(value, Format::Did)
}

pub fn is_uri_identifier(value: &Value) -> bool {
  is_format(value, Format::Uri)
}

/// `true` for `{ "format": "aliases", "identifiers": [...] }` where every
/// element is a valid non-aliases identifier. An empty array is accepted.
pub fn is_aliases_identifier(value: &Value) -> bool {
  is_format(value, Format::Aliases)
}

/// `true` if `value` validates as any one of the seven leaf formats.
pub fn is_simple_identifier(value: &Value) -> bool {
  validate_simple(value).is_ok()
}

/// `true` if `value` validates as any of the eight formats.
pub fn is_subject_identifier(value: &Value) -> bool {
  classify(value).is_some()
}

pub fn is_format(value: &Value, format: Format) -> bool {
  validate_as(value, format).is_ok()
}

/// The format `value` validates as, if any.
pub fn classify(value: &Value) -> Option<Format> { validate(value).ok() }

// ─── Diagnostics ─────────────────────────────────────────────────────────────

/// Check `value` against one specific format.
pub fn validate_as(value: &Value, format: Format) -> Result<()> {
  if format.is_aliases() {
    validate_aliases(value)
  } else {
    validate_leaf(value, format)
  }
}

/// Determine the format of `value` from its tag and validate it as such.
pub fn validate(value: &Value) -> Result<Format> {
  let format = declared_format(value)?;
  validate_as(value, format)?;
  Ok(format)
}

/// Like [`validate`], but rejects the aliases format.
///
/// This is the element check for aliases identifiers.
pub fn validate_simple(value: &Value) -> Result<Format> {
  let format = declared_format(value)?;
  if format.is_aliases() {
    return Err(Error::NestedAliases);
  }
  validate_leaf(value, format)?;
  Ok(format)
}

// ─── Internals ───────────────────────────────────────────────────────────────

/// Read and parse the `format` tag without checking anything else.
fn declared_format(value: &Value) -> Result<Format> {
  let object = value.as_object().ok_or(Error::NotAnObject)?;
  let tag = match object.get(FORMAT_ATTRIBUTE) {
    None => return Err(Error::MissingFormat),
    Some(tag) => tag.as_str().ok_or(Error::FormatNotAString)?,
  };
  Format::from_str(tag).map_err(|_| Error::UnknownFormat(tag.to_string()))
}

/// Shape and tag checks shared by every format.
fn require_shape_and_tag(
  value: &Value,
  format: Format,
) -> Result<&Map<String, Value>> {
  if !has_attributes(value, format.attributes()) {
    return Err(shape_error(value, format));
  }
  let object = value.as_object().ok_or(Error::NotAnObject)?;

  match string_attribute(object, FORMAT_ATTRIBUTE) {
    None => Err(Error::FormatNotAString),
    Some(tag) if tag == format.as_str() => Ok(object),
    Some(tag) => Err(Error::WrongFormat {
      expected: format,
      found:    tag.to_string(),
    }),
  }
}

/// Why `value` failed the shape check for `format`.
fn shape_error(value: &Value, format: Format) -> Error {
  let Some(object) = value.as_object() else {
    return Error::NotAnObject;
  };
  match missing_attribute(object, format.attributes()) {
    Some(FORMAT_ATTRIBUTE) | None => Error::MissingFormat,
    Some(attribute) => Error::MissingAttribute { format, attribute },
  }
}

fn validate_leaf(value: &Value, format: Format) -> Result<()> {
  debug_assert!(!format.is_aliases());
  let object = require_shape_and_tag(value, format)?;

  match format
    .data_attributes()
    .iter()
    .find(|attribute| string_attribute(object, attribute).is_none())
  {
    Some(&attribute) => Err(Error::NotAString { format, attribute }),
    None => Ok(()),
  }
}

fn validate_aliases(value: &Value) -> Result<()> {
  let object = require_shape_and_tag(value, Format::Aliases)?;
  let identifiers = object
    .get("identifiers")
    .and_then(Value::as_array)
    .ok_or(Error::IdentifiersNotAnArray)?;

  for (index, element) in identifiers.iter().enumerate() {
    validate_simple(element).map_err(|source| Error::InvalidAlias {
      index,
      source: Box::new(source),
    })?;
  }
  Ok(())
}
