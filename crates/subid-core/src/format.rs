//! The format tag carried in every identifier's `format` attribute.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Name of the discriminant attribute shared by every format.
pub const FORMAT_ATTRIBUTE: &str = "format";

/// The eight identifier formats. Tags are exact and case-sensitive.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Format {
  Account,
  Email,
  IssSub,
  Opaque,
  PhoneNumber,
  Did,
  Uri,
  Aliases,
}

impl Format {
  /// Every format an aliases identifier may contain.
  pub const LEAVES: [Format; 7] = [
    Self::Account,
    Self::Email,
    Self::IssSub,
    Self::Opaque,
    Self::PhoneNumber,
    Self::Did,
    Self::Uri,
  ];

  /// The tag string as it appears on the wire.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn is_aliases(self) -> bool { matches!(self, Self::Aliases) }

  /// Every attribute the shape check requires, `format` first.
  pub fn attributes(self) -> &'static [&'static str] {
    match self {
      Self::Account => &[FORMAT_ATTRIBUTE, "uri"],
      Self::Email => &[FORMAT_ATTRIBUTE, "email"],
      Self::IssSub => &[FORMAT_ATTRIBUTE, "iss", "sub"],
      Self::Opaque => &[FORMAT_ATTRIBUTE, "id"],
      Self::PhoneNumber => &[FORMAT_ATTRIBUTE, "phone_number"],
      Self::Did => &[FORMAT_ATTRIBUTE, "url"],
      Self::Uri => &[FORMAT_ATTRIBUTE, "uri"],
      Self::Aliases => &[FORMAT_ATTRIBUTE, "identifiers"],
    }
  }

  /// Attributes required alongside `format`, in declaration order.
  ///
  /// Every leaf attribute must hold a string; the aliases attribute holds an
  /// array of leaf identifiers.
  pub fn data_attributes(self) -> &'static [&'static str] {
    &self.attributes()[1..]
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn tags_match_wire_strings() {
    let tags: Vec<&str> = Format::iter().map(Format::as_str).collect();
    assert_eq!(tags, [
      "account",
      "email",
      "iss_sub",
      "opaque",
      "phone_number",
      "did",
      "uri",
      "aliases",
    ]);
  }

  #[test]
  fn display_and_serde_agree_with_tag() {
    for format in Format::iter() {
      assert_eq!(format.to_string(), format.as_str());
      assert_eq!(
        serde_json::to_value(format).unwrap(),
        serde_json::Value::String(format.as_str().to_string()),
      );
      assert_eq!(Format::from_str(format.as_str()).unwrap(), format);
    }
  }

  #[test]
  fn parsing_is_case_sensitive() {
    assert!(Format::from_str("Email").is_err());
    assert!(Format::from_str("ISS_SUB").is_err());
    assert!(Format::from_str(" email").is_err());
    assert!(Format::from_str("phone-number").is_err());
  }

  #[test]
  fn shape_lists_format_before_data_attributes() {
    for format in Format::iter() {
      let attributes = format.attributes();
      assert_eq!(attributes[0], FORMAT_ATTRIBUTE);
      assert_eq!(&attributes[1..], format.data_attributes());
      assert!(!format.data_attributes().is_empty());
    }
    assert_eq!(Format::IssSub.data_attributes(), ["iss", "sub"]);
  }

  #[test]
  fn leaves_exclude_only_aliases() {
    let leaves: Vec<Format> =
      Format::iter().filter(|f| !f.is_aliases()).collect();
    assert_eq!(leaves, Format::LEAVES);
  }
}
