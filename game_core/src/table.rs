use glam::Vec2;

use crate::{Config, Side};

/// Axis-aligned box in table space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub min: Vec2,
    pub max: Vec2,
}

impl Zone {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Nearest point inside the zone
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Table geometry, origin at the centre
///
/// The player defends `y = +half_depth`, the opponent `y = -half_depth`.
/// Each end has a goal mouth `|x| < goal_half` where the end wall is open.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub half_width: f32,
    pub half_depth: f32,
    pub goal_half: f32,
    pub puck_radius: f32,
    pub paddle_radius: f32,
}

impl Table {
    pub fn new(config: &Config) -> Self {
        Self {
            half_width: config.half_width(),
            half_depth: config.half_depth(),
            goal_half: config.goal_half(),
            puck_radius: config.puck_radius,
            paddle_radius: config.paddle_radius,
        }
    }

    /// Legal area for a paddle centre: its own half, fully on the table
    pub fn paddle_zone(&self, side: Side) -> Zone {
        let r = self.paddle_radius;
        let (y_min, y_max) = match side {
            Side::Player => (r, self.half_depth - r),
            Side::Opponent => (-self.half_depth + r, -r),
        };
        Zone::new(
            Vec2::new(-self.half_width + r, y_min),
            Vec2::new(self.half_width - r, y_max),
        )
    }

    /// Open stretch of the end walls
    pub fn in_goal_mouth(&self, x: f32) -> bool {
        x.abs() < self.goal_half
    }

    /// Centre-line `y` beyond which the puck is fully through a goal
    pub fn goal_line(&self, defender: Side) -> f32 {
        defender.sign() * (self.half_depth + self.puck_radius)
    }

    /// Side whose goal the puck has fully crossed, if any
    pub fn goal_crossed(&self, puck_pos: Vec2) -> Option<Side> {
        if puck_pos.y < self.goal_line(Side::Opponent) {
            Some(Side::Opponent)
        } else if puck_pos.y > self.goal_line(Side::Player) {
            Some(Side::Player)
        } else {
            None
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
