use thiserror::Error;

use crate::fsm::{MatchAction, MatchPhase};

/// Rejected configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("goal width {goal_width} must be smaller than table width {table_width}")]
    GoalTooWide { goal_width: f32, table_width: f32 },

    #[error("{field} must be in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f32,
    },

    #[error("winning score must be at least 1")]
    ZeroWinningScore,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Lifecycle misuse of a match
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MatchError {
    #[error("cannot {action:?} while in {from:?}")]
    InvalidTransition { from: MatchPhase, action: MatchAction },
}
