use glam::Vec2;
use hecs::World;

use crate::{Body, Config, Puck, Time, Zone};

/// Apply a paddle displacement, keeping the paddle inside its zone
///
/// The paddle's velocity becomes the displacement actually applied, which is
/// what the collision resolver transfers to the puck.
pub fn move_paddle(body: &mut Body, displacement: Vec2, zone: &Zone) {
    let old = body.pos;
    body.pos = zone.clamp(old + displacement);
    body.vel = body.pos - old;
}

/// Move `from` toward `to`, at most `max_step` units
pub fn capped_step(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    (to - from).clamp_length_max(max_step.max(0.0))
}

/// Advance a free body by `dt` frames with exponential friction
pub fn integrate(body: &mut Body, dt: f32, friction: f32) {
    body.pos += body.vel * dt;
    // friction^dt keeps the decay independent of frame rate
    body.vel *= friction.powf(dt);
}

/// Move puck based on velocity
pub fn move_puck(world: &mut World, time: &Time, config: &Config) {
    for (_entity, (_puck, body)) in world.query_mut::<(&Puck, &mut Body)>() {
        integrate(body, time.dt, config.friction);
    }
}
