//! Pseudo-3D projection between table space and screen pixels
//!
//! Depth is faked by shrinking `x` toward the screen centre as the far edge
//! is approached; `y` maps linearly. Because `y` is not distorted, the inverse
//! is closed-form: recover `y` first, then divide `x` by the scale at that
//! depth.

use glam::Vec2;

use crate::{Config, Params};

/// Projected point with its perspective scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub scale: f32, // Perspective scale at this depth, perspective..=1.0
}

impl ScreenPoint {
    /// Pixel radius of a world-space circle drawn at this point
    pub fn radius_px(&self, world_radius: f32, projection: &Projection) -> f32 {
        world_radius * projection.scale_factor * self.scale
    }
}

/// World <-> screen mapping for one viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub scale_factor: f32, // Pixels per table unit at the near edge
    pub perspective: f32,  // Scale at the far edge
    pub table_depth: f32,
}

impl Projection {
    /// Fit the table into a viewport, leaving a margin
    pub fn fit(viewport_width: f32, viewport_height: f32, config: &Config) -> Self {
        let scale_x = viewport_width / (config.table_width + Params::VIEWPORT_PADDING);
        let scale_y = viewport_height / (config.table_depth + Params::VIEWPORT_PADDING);

        Self {
            viewport_width,
            viewport_height,
            scale_factor: scale_x.min(scale_y) * Params::VIEWPORT_FILL,
            perspective: config.perspective,
            table_depth: config.table_depth,
        }
    }

    /// Recompute the fit after the viewport changed size
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32, config: &Config) {
        *self = Self::fit(viewport_width, viewport_height, config);
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    /// Perspective scale at table depth `y`
    pub fn depth_scale(&self, y: f32) -> f32 {
        let z = (y + self.table_depth / 2.0) / self.table_depth;
        self.perspective + z * (1.0 - self.perspective)
    }

    pub fn world_to_screen(&self, world: Vec2) -> ScreenPoint {
        let center = self.center();
        let scale = self.depth_scale(world.y);
        ScreenPoint {
            x: center.x + world.x * self.scale_factor * scale,
            y: center.y + world.y * self.scale_factor,
            scale,
        }
    }

    pub fn screen_to_world(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        let center = self.center();
        let y = (screen_y - center.y) / self.scale_factor;
        let scale = self.depth_scale(y);
        let x = (screen_x - center.x) / (self.scale_factor * scale);
        Vec2::new(x, y)
    }
}
