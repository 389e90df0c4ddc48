//! Syntactic URI validation for entity identifiers

use once_cell::sync::Lazy;
use regex::Regex;

static SCHEME: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").ok());

static HIERARCHICAL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(?i:https?|ftp)://[^/?#:@\s]+(:[0-9]+)?([/?#]|$)").ok());

fn matches(re: &Lazy<Option<Regex>>, text: &str) -> bool {
    re.as_ref().map_or(false, |re| re.is_match(text))
}

/// Validation result containing errors if invalid
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn with_error(error: String) -> Self {
        Self {
            valid: false,
            errors: vec![error],
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.valid = false;
        self.errors.push(error);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute URI validator
pub struct UriValidator;

impl UriValidator {
    /// Validate an absolute URI
    ///
    /// # Examples
    ///
    /// ```
    /// use ies_core::UriValidator;
    ///
    /// let result = UriValidator::validate("http://example.com/rdf/testdata#p1");
    /// assert!(result.valid);
    ///
    /// let result = UriValidator::validate("not a uri");
    /// assert!(!result.valid);
    /// assert!(!result.errors.is_empty());
    /// ```
    pub fn validate(uri: &str) -> ValidationResult {
        if uri.is_empty() {
            return ValidationResult::with_error("URI must be a non-empty string".to_string());
        }

        let mut result = ValidationResult::new();

        if !matches(&SCHEME, uri) {
            result.add_error(format!("URI has no scheme: {}", uri));
        }

        if let Some(bad) = uri
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`'))
        {
            result.add_error(format!("URI contains illegal character {:?}: {}", bad, uri));
        }

        let lower = uri.to_ascii_lowercase();
        let needs_authority = ["http:", "https:", "ftp:"].iter().any(|s| lower.starts_with(s));
        if needs_authority && !matches(&HIERARCHICAL, uri) {
            result.add_error(format!("URI has no host: {}", uri));
        }

        result
    }

    /// Shorthand for `validate(uri).valid`
    pub fn is_valid(uri: &str) -> bool {
        Self::validate(uri).valid
    }
}
