use glam::Vec2;

use crate::{Config, GameRng, Params};

/// Which end of the table a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Human, defends y = +depth/2 (near edge)
    Player,
    /// Scripted, defends y = -depth/2 (far edge)
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// +1 for the near end, -1 for the far end
    pub fn sign(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }
}

/// Circular body in table space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2, // Units per reference frame
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Place the puck on the loser's half, drifting toward the loser's goal
    pub fn serve(&mut self, loser: Side, rng: &mut GameRng) {
        use rand::Rng;
        let toward_loser = loser.sign();
        let lateral: f32 = rng.0.gen_range(-0.5..0.5) * Params::SERVE_LATERAL;

        self.pos = Vec2::new(0.0, toward_loser * Params::SERVE_OFFSET);
        self.vel = Vec2::new(lateral, toward_loser * Params::SERVE_SPEED);
    }
}

/// Marker for the puck entity
#[derive(Debug, Clone, Copy, Default)]
pub struct Puck;

/// Paddle component
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    /// Resting position in front of the paddle's own goal
    pub fn home(side: Side, config: &Config) -> Vec2 {
        Vec2::new(0.0, side.sign() * (config.half_depth() - Params::PADDLE_HOME_INSET))
    }
}

/// Where a paddle wants to be; persists until replaced
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub target: Vec2,
}

impl PaddleIntent {
    pub fn new(target: Vec2) -> Self {
        Self { target }
    }
}

/// Heuristic branch chosen by the opponent controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpponentBranch {
    ReboundClear,
    Intercept,
    TrackBehind,
    ShadowForward,
    #[default]
    Idle,
}

/// Opponent controller state
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentBrain {
    pub branch: OpponentBranch,
    pub speed: f32, // Difficulty: max units per reference frame
}

impl OpponentBrain {
    pub fn new(speed: f32) -> Self {
        Self {
            branch: OpponentBranch::Idle,
            speed,
        }
    }
}
