//! Subject identifier classification for security event tokens.
//!
//! Consumers hold untyped JSON (usually the `sub_id` claim of a decoded token
//! payload) and need to know which of the eight standard identifier formats it
//! is. This crate answers that with total predicates over
//! [`serde_json::Value`], and narrows accepted values into the typed model in
//! [`identifier`].
//!
//! Pure synchronous code; no parsing of raw text, no I/O.
//!
//! # Quick start
//!
//! ```
//! use serde_json::json;
//! use subid_core::{Format, SubjectIdentifier, classify, is_email_identifier};
//!
//! let claim = json!({ "format": "email", "email": "alice@example.com" });
//! assert!(is_email_identifier(&claim));
//! assert_eq!(classify(&claim), Some(Format::Email));
//!
//! let typed = SubjectIdentifier::from_value(&claim).unwrap();
//! assert_eq!(typed.format(), Format::Email);
//! ```

pub mod classify;
pub mod error;
pub mod format;
pub mod identifier;
pub mod shape;

pub use classify::{
  classify, is_account_identifier, is_aliases_identifier, is_did_identifier,
  is_email_identifier, is_format, is_iss_sub_identifier, is_opaque_identifier,
  is_phone_number_identifier, is_simple_identifier, is_subject_identifier,
  is_uri_identifier, validate, validate_as, validate_simple,
};
pub use error::{Error, Result};
pub use format::Format;
pub use identifier::{
  AccountIdentifier, AliasesIdentifier, DidIdentifier, EmailIdentifier,
  Identifier, IssSubIdentifier, OpaqueIdentifier, PhoneNumberIdentifier,
  SimpleIdentifier, SubjectIdentifier, UriIdentifier,
};
pub use shape::has_attributes;
