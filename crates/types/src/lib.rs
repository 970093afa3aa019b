//! Validated text primitives shared across the Carefinder crates.
//!
//! Registration payloads arrive as free-form JSON strings. These wrappers move the
//! "is this field usable at all" checks to construction time so the registry only
//! ever sees trimmed, non-empty values.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input did not look like an email address
    #[error("Please enter a valid email")]
    InvalidEmail,
    /// The input was not made up of exactly the expected number of ASCII digits
    #[error("expected exactly {expected} digits")]
    DigitCount { expected: usize },
}

/// Trimmed text with at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A trimmed, lower-cased email address.
///
/// The check is deliberately loose: some non-whitespace, an `@`, some non-whitespace,
/// a `.`, and some non-whitespace. Deliverability is not our concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::InvalidEmail` when the
    /// trimmed input does not have the `local@domain.tld` shape.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TextError::InvalidEmail);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(TextError::InvalidEmail)?;
        let dot = domain.rfind('.').ok_or(TextError::InvalidEmail)?;
        if local.is_empty() || dot == 0 || dot == domain.len() - 1 {
            return Err(TextError::InvalidEmail);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks that `input` (after trimming) is exactly `expected` ASCII digits and returns the
/// trimmed digits.
///
/// Used for phone numbers and postal codes, which are stored as strings so leading zeros
/// survive.
///
/// # Errors
///
/// Returns `TextError::DigitCount` on any other shape.
pub fn exact_digits(input: &str, expected: usize) -> Result<String, TextError> {
    let trimmed = input.trim();
    if trimmed.len() != expected || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TextError::DigitCount { expected });
    }
    Ok(trimmed.to_owned())
}
