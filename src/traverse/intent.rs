//! Navigation intents and key outcomes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a navigation key asks the strategy to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIntent {
    /// Escape: close the editor without applying
    Cancel,
    /// Enter/Return: commit and edit the next row, same column
    NextRow,
    /// Tab: commit and edit the next column
    NextColumn,
    /// Shift+Tab: commit and edit the previous column
    PreviousColumn,
    /// Arrow-Down
    RowDown,
    /// Arrow-Up
    RowUp,
}

impl NavIntent {
    pub const ALL: [NavIntent; 6] = [
        NavIntent::Cancel,
        NavIntent::NextRow,
        NavIntent::NextColumn,
        NavIntent::PreviousColumn,
        NavIntent::RowDown,
        NavIntent::RowUp,
    ];

    /// Name used in keymap files
    pub fn name(self) -> &'static str {
        match self {
            NavIntent::Cancel => "cancel",
            NavIntent::NextRow => "next_row",
            NavIntent::NextColumn => "next_column",
            NavIntent::PreviousColumn => "previous_column",
            NavIntent::RowDown => "row_down",
            NavIntent::RowUp => "row_up",
        }
    }

    /// Arrow movement, which selection editors keep for themselves
    pub fn is_arrow(self) -> bool {
        matches!(self, NavIntent::RowDown | NavIntent::RowUp)
    }
}

impl fmt::Display for NavIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown intent name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIntentError(pub String);

impl fmt::Display for ParseIntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown navigation intent: {}", self.0)
    }
}

impl std::error::Error for ParseIntentError {}

impl FromStr for NavIntent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        NavIntent::ALL
            .into_iter()
            .find(|intent| intent.name() == normalized)
            .ok_or_else(|| ParseIntentError(s.to_string()))
    }
}

/// Result of routing a key to a strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOutcome {
    /// The strategy handled the key; default processing is suppressed
    Consumed,
    /// The key goes on to the editor (typing, drop-down browsing)
    Forwarded,
}

impl KeyOutcome {
    pub fn is_consumed(self) -> bool {
        self == KeyOutcome::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names_round_trip() {
        for intent in NavIntent::ALL {
            assert_eq!(intent.name().parse::<NavIntent>(), Ok(intent));
        }
    }

    #[test]
    fn test_intent_parse_is_lenient() {
        assert_eq!("Next-Column".parse::<NavIntent>(), Ok(NavIntent::NextColumn));
        assert!("jump".parse::<NavIntent>().is_err());
    }

    #[test]
    fn test_arrow_intents() {
        assert!(NavIntent::RowDown.is_arrow());
        assert!(!NavIntent::NextRow.is_arrow());
    }
}
