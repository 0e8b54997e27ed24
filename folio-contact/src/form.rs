//! Contact form model and validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use folio_core::constants::{
    EMAIL_PATTERN, INVALID_EMAIL_MESSAGE, MAX_LENGTH_MESSAGE, MESSAGE_MAX_LENGTH,
    MESSAGE_MIN_LENGTH, MIN_LENGTH_MESSAGE, NAME_MAX_LENGTH, NAME_MIN_LENGTH,
    REQUIRED_FIELD_MESSAGE,
};
use folio_core::error::FolioError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).unwrap());

/// Returns true if `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn min_length(min: usize) -> String {
    MIN_LENGTH_MESSAGE.replace("{min}", &min.to_string())
}

fn max_length(max: usize) -> String {
    MAX_LENGTH_MESSAGE.replace("{max}", &max.to_string())
}

/// A contact form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Sender's name
    Name,
    /// Sender's reply address
    Email,
    /// Message body
    Message,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// The field's form name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// Validates a single value for this field.
    ///
    /// Rules are checked in order and the first failure wins: presence,
    /// then format or minimum length, then maximum length.
    pub fn validate(&self, value: &str) -> Option<String> {
        if !is_present(value) {
            return Some(REQUIRED_FIELD_MESSAGE.to_string());
        }

        let len = value.chars().count();
        match self {
            Field::Name if len < NAME_MIN_LENGTH => Some(min_length(NAME_MIN_LENGTH)),
            Field::Name if len > NAME_MAX_LENGTH => Some(max_length(NAME_MAX_LENGTH)),
            Field::Email if !validate_email(value) => Some(INVALID_EMAIL_MESSAGE.to_string()),
            Field::Message if len < MESSAGE_MIN_LENGTH => Some(min_length(MESSAGE_MIN_LENGTH)),
            Field::Message if len > MESSAGE_MAX_LENGTH => Some(max_length(MESSAGE_MAX_LENGTH)),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures keyed by field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// The message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Clears the failure for `field`, as when the user edits it.
    pub fn clear_field(&mut self, field: Field) {
        self.0.remove(&field);
    }

    fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, msg)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<FieldErrors> for FolioError {
    fn from(errors: FieldErrors) -> Self {
        FolioError::ValidationError(errors.to_string())
    }
}

/// A contact form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender's name
    pub name: String,
    /// Sender's reply address
    pub email: String,
    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Creates a submission.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// The current value of `field`.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Validates one field of this submission.
    pub fn validate_field(&self, field: Field) -> Option<String> {
        field.validate(self.value(field))
    }

    /// Validates every field, collecting all failures.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for field in Field::ALL {
            if let Some(message) = self.validate_field(field) {
                errors.insert(field, message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Resets every field, as after a successful send.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn valid() -> ContactForm {
        ContactForm::new("Ada Lovelace", "ada@example.com", "I'd like to talk about a project.")
    }

    #[test]
    fn test_valid_form() {
        assert!(valid().validate().is_ok());
    }

    #[test_case("ada@example.com", true)]
    #[test_case("a.b+tag@sub.example.co", true)]
    #[test_case("ada@example", false)]
    #[test_case("ada example@x.com", false)]
    #[test_case("@example.com", false)]
    #[test_case("ada@@example.com", false)]
    fn test_validate_email(email: &str, expected: bool) {
        assert_eq!(validate_email(email), expected);
    }

    #[test_case(Field::Name, "", "This field is required")]
    #[test_case(Field::Name, "   ", "This field is required")]
    #[test_case(Field::Name, "A", "Must contain at least 2 characters")]
    #[test_case(Field::Email, "", "This field is required")]
    #[test_case(Field::Email, "not-an-email", "Please enter a valid email address")]
    #[test_case(Field::Message, "short", "Must contain at least 10 characters")]
    fn test_field_messages(field: Field, value: &str, expected: &str) {
        assert_eq!(field.validate(value).as_deref(), Some(expected));
    }

    #[test]
    fn test_max_lengths() {
        assert_eq!(
            Field::Name.validate(&"x".repeat(51)).as_deref(),
            Some("Must not exceed 50 characters")
        );
        assert!(Field::Name.validate(&"x".repeat(50)).is_none());
        assert_eq!(
            Field::Message.validate(&"x".repeat(501)).as_deref(),
            Some("Must not exceed 500 characters")
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // Two characters, four bytes.
        assert!(Field::Name.validate("éé").is_none());
    }

    #[test]
    fn test_collects_all_failures() {
        let form = ContactForm::new("", "nope", "hi");
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Name), Some("This field is required"));
        assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address"));
        assert_eq!(errors.get(Field::Message), Some("Must contain at least 10 characters"));
        assert_eq!(
            errors.to_string(),
            "name: This field is required; email: Please enter a valid email address; \
             message: Must contain at least 10 characters"
        );
    }

    #[test]
    fn test_clear_field_error() {
        let mut errors = ContactForm::new("", "ada@example.com", "hi").validate().unwrap_err();
        errors.clear_field(Field::Name);
        assert_eq!(errors.len(), 1);
        assert!(errors.get(Field::Name).is_none());
    }

    #[test]
    fn test_into_folio_error() {
        let errors = ContactForm::default().validate().unwrap_err();
        let err: FolioError = errors.into();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_clear_form() {
        let mut form = valid();
        form.clear();
        assert_eq!(form, ContactForm::default());
    }
}
