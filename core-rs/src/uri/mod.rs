//! URI checks for entity identifiers
//!
//! Entity URIs are validated leniently: a failed check is reported,
//! never enforced. See [`UriValidator`].

pub mod validator;

pub use validator::{UriValidator, ValidationResult};
