//! Display language support
//!
//! The assistant ships with Portuguese and English surfaces. The active
//! language affects UI labels and the system-prompt language directive
//! only, never extraction or context-assembly logic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// Portuguese (Brazil)
    #[default]
    Portuguese,
    /// English
    English,
}

impl Language {
    /// Get the ISO 639-1 language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }

    /// Get the language name for display
    pub fn name(&self) -> &'static str {
        match self {
            Language::Portuguese => "Português",
            Language::English => "English",
        }
    }

    /// Parse from an ISO 639-1 code or common name
    ///
    /// Unrecognized values fall back to the default language.
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Language::English,
            _ => Language::Portuguese,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(Language::Portuguese.code(), "pt");
        assert_eq!(Language::English.code(), "en");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("English"), Language::English);
        assert_eq!(Language::from_code("pt"), Language::Portuguese);
        assert_eq!(Language::from_code("português"), Language::Portuguese);
        // Unknown codes fall back to the default
        assert_eq!(Language::from_code("ja"), Language::Portuguese);
    }

    #[test]
    fn test_default() {
        assert_eq!(Language::default(), Language::Portuguese);
    }
}
