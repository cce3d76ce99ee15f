//! Typed subject identifiers.
//!
//! Values here only come into existence through narrowing (which validates
//! first) or direct construction. Each struct pairs with its [`Format`] via
//! the [`Identifier`] trait.
//!
//! [`AliasesIdentifier`] holds [`SimpleIdentifier`]s, which have no aliases
//! variant, so nesting aliases cannot be expressed.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  classify::{self, validate, validate_simple},
  error::Result,
  format::Format,
};

// ─── Identifier trait ────────────────────────────────────────────────────────

/// A single identifier shape and its format tag.
pub trait Identifier:
  Serialize + DeserializeOwned + Into<SubjectIdentifier>
{
  const FORMAT: Format;

  /// Whether `value` validates as this format.
  fn matches(value: &Value) -> bool { classify::is_format(value, Self::FORMAT) }

  /// Narrow `value` to this type, or `None` if it is not of this format.
  fn narrow(value: &Value) -> Option<Self> {
    if !Self::matches(value) {
      return None;
    }
    serde_json::from_value(value.clone()).ok()
  }
}

// ─── Leaf formats ────────────────────────────────────────────────────────────

/// An account at a service, identified by an `acct:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountIdentifier {
  pub uri: String,
}

/// An email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailIdentifier {
  pub email: String,
}

/// An issuer and a subject scoped to that issuer, as in a JWT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssSubIdentifier {
  pub iss: String,
  pub sub: String,
}

/// An identifier with no structure the receiver can interpret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpaqueIdentifier {
  pub id: String,
}

/// A telephone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumberIdentifier {
  pub phone_number: String,
}

/// A decentralized identifier URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DidIdentifier {
  pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UriIdentifier {
  pub uri: String,
}

impl AccountIdentifier {
  pub fn new(uri: impl Into<String>) -> Self { Self { uri: uri.into() } }
}

impl EmailIdentifier {
  pub fn new(email: impl Into<String>) -> Self {
    Self {
      email: email.into(),
    }
  }
}

impl IssSubIdentifier {
  pub fn new(iss: impl Into<String>, sub: impl Into<String>) -> Self {
    Self {
      iss: iss.into(),
      sub: sub.into(),
    }
  }
}

impl OpaqueIdentifier {
  pub fn new(id: impl Into<String>) -> Self { Self { id: id.into() } }
}

impl PhoneNumberIdentifier {
  pub fn new(phone_number: impl Into<String>) -> Self {
    Self {
      phone_number: phone_number.into(),
    }
  }
}

impl DidIdentifier {
  pub fn new(url: impl Into<String>) -> Self { Self { url: url.into() } }
}

impl UriIdentifier {
  pub fn new(uri: impl Into<String>) -> Self { Self { uri: uri.into() } }
}

// ─── Aliases ─────────────────────────────────────────────────────────────────

/// Several identifiers believed to denote the same subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AliasesIdentifier {
  pub identifiers: Vec<SimpleIdentifier>,
}

impl AliasesIdentifier {
  pub fn new(identifiers: Vec<SimpleIdentifier>) -> Self {
    Self { identifiers }
  }

  pub fn iter(&self) -> std::slice::Iter<'_, SimpleIdentifier> {
    self.identifiers.iter()
  }

  pub fn len(&self) -> usize { self.identifiers.len() }

  pub fn is_empty(&self) -> bool { self.identifiers.is_empty() }
}

impl FromIterator<SimpleIdentifier> for AliasesIdentifier {
  fn from_iter<I: IntoIterator<Item = SimpleIdentifier>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

impl<'a> IntoIterator for &'a AliasesIdentifier {
  type IntoIter = std::slice::Iter<'a, SimpleIdentifier>;
  type Item = &'a SimpleIdentifier;

  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

// ─── Unions ──────────────────────────────────────────────────────────────────

/// Any identifier that may appear inside an aliases identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum SimpleIdentifier {
  Account(AccountIdentifier),
  Email(EmailIdentifier),
  IssSub(IssSubIdentifier),
  Opaque(OpaqueIdentifier),
  PhoneNumber(PhoneNumberIdentifier),
  Did(DidIdentifier),
  Uri(UriIdentifier),
}

/// Any of the eight identifier formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum SubjectIdentifier {
  Account(AccountIdentifier),
  Email(EmailIdentifier),
  IssSub(IssSubIdentifier),
  Opaque(OpaqueIdentifier),
  PhoneNumber(PhoneNumberIdentifier),
  Did(DidIdentifier),
  Uri(UriIdentifier),
  Aliases(AliasesIdentifier),
}

impl SimpleIdentifier {
  /// Validate `value` as a non-aliases identifier and convert it.
  pub fn from_value(value: &Value) -> Result<Self> {
    let format = validate_simple(value).inspect_err(|err| {
      tracing::debug!(%err, "rejected simple identifier");
    })?;
    tracing::trace!(%format, "narrowed simple identifier");
    Ok(serde_json::from_value(value.clone())?)
  }

  pub fn format(&self) -> Format {
    match self {
      Self::Account(_) => Format::Account,
      Self::Email(_) => Format::Email,
      Self::IssSub(_) => Format::IssSub,
      Self::Opaque(_) => Format::Opaque,
      Self::PhoneNumber(_) => Format::PhoneNumber,
      Self::Did(_) => Format::Did,
      Self::Uri(_) => Format::Uri,
    }
  }

  /// Serialise back to the wire shape, `format` tag included.
  pub fn to_value(&self) -> Result<Value> { Ok(serde_json::to_value(self)?) }
}

impl SubjectIdentifier {
  /// Validate `value` as any identifier format and convert it.
  pub fn from_value(value: &Value) -> Result<Self> {
    let format = validate(value).inspect_err(|err| {
      tracing::debug!(%err, "rejected subject identifier");
    })?;
    tracing::trace!(%format, "narrowed subject identifier");
    Ok(serde_json::from_value(value.clone())?)
  }

  pub fn format(&self) -> Format {
    match self {
      Self::Account(_) => Format::Account,
      Self::Email(_) => Format::Email,
      Self::IssSub(_) => Format::IssSub,
      Self::Opaque(_) => Format::Opaque,
      Self::PhoneNumber(_) => Format::PhoneNumber,
      Self::Did(_) => Format::Did,
      Self::Uri(_) => Format::Uri,
      Self::Aliases(_) => Format::Aliases,
    }
  }

  /// Serialise back to the wire shape, `format` tag included.
  pub fn to_value(&self) -> Result<Value> { Ok(serde_json::to_value(self)?) }

  /// The non-aliases identifier, if this is one.
  pub fn as_simple(&self) -> Option<SimpleIdentifier> {
    SimpleIdentifier::try_from(self.clone()).ok()
  }
}

impl TryFrom<&Value> for SimpleIdentifier {
  type Error = crate::Error;

  fn try_from(value: &Value) -> Result<Self> { Self::from_value(value) }
}

impl TryFrom<&Value> for SubjectIdentifier {
  type Error = crate::Error;

  fn try_from(value: &Value) -> Result<Self> { Self::from_value(value) }
}

impl TryFrom<SubjectIdentifier> for SimpleIdentifier {
  type Error = AliasesIdentifier;

  /// Fails with the aliases identifier itself when given one.
  fn try_from(
    identifier: SubjectIdentifier,
  ) -> std::result::Result<Self, Self::Error> {
    Ok(match identifier {
      SubjectIdentifier::Account(i) => Self::Account(i),
      SubjectIdentifier::Email(i) => Self::Email(i),
      SubjectIdentifier::IssSub(i) => Self::IssSub(i),
      SubjectIdentifier::Opaque(i) => Self::Opaque(i),
      SubjectIdentifier::PhoneNumber(i) => Self::PhoneNumber(i),
      SubjectIdentifier::Did(i) => Self::Did(i),
      SubjectIdentifier::Uri(i) => Self::Uri(i),
      SubjectIdentifier::Aliases(aliases) => return Err(aliases),
    })
  }
}

impl From<SimpleIdentifier> for SubjectIdentifier {
  fn from(identifier: SimpleIdentifier) -> Self {
    match identifier {
      SimpleIdentifier::Account(i) => Self::Account(i),
      SimpleIdentifier::Email(i) => Self::Email(i),
      SimpleIdentifier::IssSub(i) => Self::IssSub(i),
      SimpleIdentifier::Opaque(i) => Self::Opaque(i),
      SimpleIdentifier::PhoneNumber(i) => Self::PhoneNumber(i),
      SimpleIdentifier::Did(i) => Self::Did(i),
      SimpleIdentifier::Uri(i) => Self::Uri(i),
    }
  }
}

/// Wires a leaf struct to its format tag and both union variants.
macro_rules! leaf_identifier {
  ($ty:ident, $variant:ident) => {
    impl Identifier for $ty {
      const FORMAT: Format = Format::$variant;
    }

    impl From<$ty> for SimpleIdentifier {
      fn from(identifier: $ty) -> Self { Self::$variant(identifier) }
    }

    impl From<$ty> for SubjectIdentifier {
      fn from(identifier: $ty) -> Self { Self::$variant(identifier) }
    }
  };
}

leaf_identifier!(AccountIdentifier, Account);
leaf_identifier!(EmailIdentifier, Email);
leaf_identifier!(IssSubIdentifier, IssSub);
leaf_identifier!(OpaqueIdentifier, Opaque);
leaf_identifier!(PhoneNumberIdentifier, PhoneNumber);
leaf_identifier!(DidIdentifier, Did);
leaf_identifier!(UriIdentifier, Uri);

impl Identifier for AliasesIdentifier {
  const FORMAT: Format = Format::Aliases;
}

impl From<AliasesIdentifier> for SubjectIdentifier {
  fn from(aliases: AliasesIdentifier) -> Self { Self::Aliases(aliases) }
}
