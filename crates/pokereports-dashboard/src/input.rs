use serde::Serialize;
use thiserror::Error;

pub const COUNT_ERROR_MESSAGE: &str = "Please enter a positive whole number.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", COUNT_ERROR_MESSAGE)]
pub struct InvalidCount;

/// The "number of records" field.
///
/// Only the empty string (so the field can be cleared) and ASCII digit
/// strings are accepted. A rejected edit leaves the previous value in
/// place and shows the inline message. Nothing else is normalized, so
/// `"007"` is kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountInput {
    value: String,
    error: Option<String>,
}

impl CountInput {
    pub fn set(&mut self, input: &str) -> Result<(), InvalidCount> {
        if input.is_empty() || input.bytes().all(|b| b.is_ascii_digit()) {
            self.value = input.to_string();
            self.error = None;
            Ok(())
        } else {
            self.error = Some(COUNT_ERROR_MESSAGE.to_string());
            Err(InvalidCount)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Inline validation message, if the last edit was rejected.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
