/// Minimum number of characters accepted for a free-text assessment.
pub const MIN_ASSESSMENT_CHARS: usize = 10;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Assessment text with fewer characters than required.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Text must be at least {min} characters (got {actual})")]
pub struct TextTooShort {
    pub min: usize,
    pub actual: usize,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
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
}

/// Free text submitted for assessment.
///
/// Holds at least [`MIN_ASSESSMENT_CHARS`] characters, counted as Unicode scalar values.
/// Unlike [`NonEmptyText`] the input is kept verbatim: surrounding whitespace counts towards the
/// length and takes part in scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentText(String);

impl AssessmentText {
    /// Validates `input` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `TextTooShort` if `input` has fewer than [`MIN_ASSESSMENT_CHARS`] characters.
    pub fn new(input: impl Into<String>) -> Result<Self, TextTooShort> {
        let input = input.into();
        let actual = input.chars().count();
        if actual < MIN_ASSESSMENT_CHARS {
            return Err(TextTooShort {
                min: MIN_ASSESSMENT_CHARS,
                actual,
            });
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
