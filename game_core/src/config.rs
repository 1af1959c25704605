use serde::Deserialize;

use crate::error::ConfigError;
use crate::params::Params;

/// Game configuration
///
/// Immutable once a match is built. `opponent_speed` is what
/// [`crate::Difficulty::Configured`] selects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table_width: f32,
    pub table_depth: f32,
    pub goal_width: f32,
    pub perspective: f32,
    pub puck_radius: f32,
    pub paddle_radius: f32,
    pub friction: f32,
    pub wall_restitution: f32,
    pub paddle_restitution: f32,
    pub max_puck_speed: f32,
    pub smash_boost: f32,
    pub paddle_speed_limit: f32,
    pub opponent_speed: f32,
    pub opponent_approach: f32,
    pub winning_score: u8,
    pub reset_delay_ms: f64,
    pub hit_interval_ms: f64, // Simulation ms between audible hits
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_width: Params::TABLE_WIDTH,
            table_depth: Params::TABLE_DEPTH,
            goal_width: Params::GOAL_WIDTH,
            perspective: Params::PERSPECTIVE,
            puck_radius: Params::PUCK_RADIUS,
            paddle_radius: Params::PADDLE_RADIUS,
            friction: Params::FRICTION,
            wall_restitution: Params::WALL_RESTITUTION,
            paddle_restitution: Params::PADDLE_RESTITUTION,
            max_puck_speed: Params::MAX_PUCK_SPEED,
            smash_boost: Params::SMASH_BOOST,
            paddle_speed_limit: Params::PADDLE_SPEED_LIMIT,
            opponent_speed: Params::OPPONENT_SPEED_EXPERT,
            opponent_approach: Params::OPPONENT_APPROACH,
            winning_score: Params::WINNING_SCORE,
            reset_delay_ms: Params::RESET_DELAY_MS,
            hit_interval_ms: Params::HIT_INTERVAL_MS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check geometric and physical invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("table_width", self.table_width),
            ("table_depth", self.table_depth),
            ("goal_width", self.goal_width),
            ("puck_radius", self.puck_radius),
            ("paddle_radius", self.paddle_radius),
            ("max_puck_speed", self.max_puck_speed),
            ("paddle_speed_limit", self.paddle_speed_limit),
            ("opponent_speed", self.opponent_speed),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.goal_width >= self.table_width {
            return Err(ConfigError::GoalTooWide {
                goal_width: self.goal_width,
                table_width: self.table_width,
            });
        }

        let half_open = [
            ("friction", self.friction, "(0, 1]"),
            ("perspective", self.perspective, "(0, 1]"),
            ("opponent_approach", self.opponent_approach, "(0, 1]"),
        ];
        for (field, value, range) in half_open {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::OutOfRange {
                    field,
                    range,
                    value,
                });
            }
        }

        let restitution = [
            ("wall_restitution", self.wall_restitution),
            ("paddle_restitution", self.paddle_restitution),
        ];
        for (field, value) in restitution {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    range: "[0, 1)",
                    value,
                });
            }
        }

        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }

        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.table_width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.table_depth / 2.0
    }

    pub fn goal_half(&self) -> f32 {
        self.goal_width / 2.0
    }

    /// Sum of radii at which puck and paddle touch
    pub fn contact_distance(&self) -> f32 {
        self.puck_radius + self.paddle_radius
    }
}
