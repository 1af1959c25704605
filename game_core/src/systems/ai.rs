//! Opponent controller
//!
//! Each tick the opponent picks a target from the puck state using the first
//! matching branch below, then eases toward it: a fraction of the remaining
//! distance, capped by the difficulty speed. Thresholds are tuning, measured
//! from the opponent's own end wall unless noted.

use glam::Vec2;
use hecs::World;

use crate::{
    move_paddle, Body, Config, OpponentBranch, OpponentBrain, Paddle, PaddleIntent, Puck, Side,
    Table, Time,
};

/// Depth of the normal guarding line
const DEFENSIVE_INSET: f32 = 150.0;

// Rebound-clear: puck stalled deep in our corner
const REBOUND_DEPTH: f32 = 100.0;
const REBOUND_BEHIND_SLACK: f32 = 10.0;
const REBOUND_MAX_SPEED: f32 = 10.0;
const REBOUND_GAP: f32 = 5.0;
const REBOUND_CENTER_BAND: f32 = 100.0;
const REBOUND_SIDE_OFFSET: f32 = 80.0;
const REBOUND_WALL_PULL: f32 = 0.8;

// Intercept: puck inbound fast, from table-centre coordinates
const INTERCEPT_FORWARD_Y: f32 = 200.0;
const INTERCEPT_MIN_SPEED: f32 = 8.0;
const INTERCEPT_INSET: f32 = 60.0;

// Track-behind
const TRACK_SIDE_OFFSET: f32 = 160.0;

// Shadow-forward, from table-centre coordinates
const SHADOW_FORWARD_Y: f32 = -50.0;
const SHADOW_LEAD: f32 = 30.0;

// Idle
const IDLE_PULL: f32 = 0.5;
const IDLE_RETREAT: f32 = 30.0;

/// Pick the opponent's branch and unclamped target for this tick
pub fn choose_target(puck: &Body, paddle: &Body, table: &Table) -> (OpponentBranch, Vec2) {
    let end_wall = -table.half_depth;
    let defensive_y = end_wall + DEFENSIVE_INSET;
    let p = puck.pos;

    if p.y < end_wall + REBOUND_DEPTH
        && p.y < paddle.pos.y + REBOUND_BEHIND_SLACK
        && puck.speed() < REBOUND_MAX_SPEED
    {
        // Strike from the centre side so the puck is cleared toward a wall
        let x = if p.x.abs() < REBOUND_CENTER_BAND {
            if p.x < 0.0 {
                p.x + REBOUND_SIDE_OFFSET
            } else {
                p.x - REBOUND_SIDE_OFFSET
            }
        } else {
            p.x * REBOUND_WALL_PULL
        };
        let y = p.y - puck.radius - REBOUND_GAP;
        return (OpponentBranch::ReboundClear, Vec2::new(x, y));
    }

    if p.y < INTERCEPT_FORWARD_Y && puck.vel.y < -INTERCEPT_MIN_SPEED {
        let frames_to_goal = ((p.y - end_wall) / puck.vel.y).abs();
        let intercept_x = p.x + puck.vel.x * frames_to_goal;
        let x = intercept_x.clamp(-table.goal_half, table.goal_half);
        return (
            OpponentBranch::Intercept,
            Vec2::new(x, end_wall + INTERCEPT_INSET),
        );
    }

    if p.y < paddle.pos.y {
        // Puck slipped behind us: go around it on the side we are already on
        let x = if p.x < paddle.pos.x {
            p.x + TRACK_SIDE_OFFSET
        } else {
            p.x - TRACK_SIDE_OFFSET
        };
        return (OpponentBranch::TrackBehind, Vec2::new(x, defensive_y));
    }

    if p.y < SHADOW_FORWARD_Y && p.y > paddle.pos.y {
        return (
            OpponentBranch::ShadowForward,
            Vec2::new(p.x, p.y + SHADOW_LEAD),
        );
    }

    (
        OpponentBranch::Idle,
        Vec2::new(p.x * IDLE_PULL, defensive_y - IDLE_RETREAT),
    )
}

/// Fraction of the remaining distance covered in `dt` frames
///
/// Compounds like friction so easing does not depend on frame rate.
pub fn approach_fraction(per_frame: f32, dt: f32) -> f32 {
    1.0 - (1.0 - per_frame).powf(dt)
}

/// Choose a target for the opponent paddle and move toward it
pub fn drive_opponent(world: &mut World, time: &Time, table: &Table, config: &Config) {
    let puck = {
        let mut query = world.query::<(&Puck, &Body)>();
        query.iter().next().map(|(_e, (_puck, body))| *body)
    };
    let Some(puck) = puck else {
        return;
    };

    let zone = table.paddle_zone(Side::Opponent);
    let fraction = approach_fraction(config.opponent_approach, time.dt);

    for (_entity, (paddle, body, intent, brain)) in world.query_mut::<(
        &Paddle,
        &mut Body,
        &mut PaddleIntent,
        &mut OpponentBrain,
    )>() {
        if paddle.side != Side::Opponent {
            continue;
        }

        let (branch, target) = choose_target(&puck, body, table);
        if branch != brain.branch {
            log::debug!("opponent: {:?} -> {:?}", brain.branch, branch);
            brain.branch = branch;
        }
        intent.target = zone.clamp(target);

        let step = ((intent.target - body.pos) * fraction)
            .clamp_length_max((brain.speed * time.dt).max(0.0));
        move_paddle(body, step, &zone);
    }
}
