use std::fmt;

use crate::constants::MAX_NAME_LENGTH;

#[derive(Debug, PartialEq)]
pub enum NameError {
    Empty,
    TooLong,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Empty => write!(f, "Name must not be empty."),
            NameError::TooLong => write!(
                f,
                "Name must be at most {} characters long.",
                MAX_NAME_LENGTH
            ),
        }
    }
}

pub fn sanitize_name(input: &str) -> Result<String, NameError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_empty_names() {
        assert_eq!(sanitize_name(""), Err(NameError::Empty));
    }

    #[test]
    fn sanitize_rejects_whitespace_only_names() {
        assert_eq!(sanitize_name("   "), Err(NameError::Empty));
    }

    #[test]
    fn sanitize_rejects_names_that_are_too_long() {
        let long_name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(sanitize_name(&long_name), Err(NameError::TooLong));
    }

    #[test]
    fn sanitize_trims_whitespace() {
        assert_eq!(sanitize_name("  Alice  "), Ok("Alice".to_string()));
    }
}
