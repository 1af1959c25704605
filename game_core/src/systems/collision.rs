use hecs::World;

use crate::{Body, Config, Events, GameEvent, Paddle, Puck, Side, Table, Time};

/// Reflect the puck off the side walls and the closed parts of the end walls
///
/// Returns true if any wall was hit. Inside the goal mouth the end wall is
/// open and the puck passes through.
pub fn bounce_walls(puck: &mut Body, table: &Table, restitution: f32) -> bool {
    let mut hit = false;

    let side_limit = table.half_width - puck.radius;
    if puck.pos.x > side_limit {
        puck.pos.x = side_limit;
        puck.vel.x = -puck.vel.x.abs() * restitution;
        hit = true;
    } else if puck.pos.x < -side_limit {
        puck.pos.x = -side_limit;
        puck.vel.x = puck.vel.x.abs() * restitution;
        hit = true;
    }

    if !table.in_goal_mouth(puck.pos.x) {
        let end_limit = table.half_depth - puck.radius;
        if puck.pos.y > end_limit {
            puck.pos.y = end_limit;
            puck.vel.y = -puck.vel.y.abs() * restitution;
            hit = true;
        } else if puck.pos.y < -end_limit {
            puck.pos.y = -end_limit;
            puck.vel.y = puck.vel.y.abs() * restitution;
            hit = true;
        }
    }

    hit
}

/// Resolve puck-paddle overlap; the paddle is immovable from the puck's side
///
/// Returns true on contact. Coincident centres have no contact normal and
/// are skipped for this tick.
pub fn resolve_paddle_contact(puck: &mut Body, paddle: &Body, side: Side, config: &Config) -> bool {
    let offset = puck.pos - paddle.pos;
    let dist = offset.length();
    let min_dist = puck.radius + paddle.radius;

    if dist >= min_dist || dist <= f32::EPSILON {
        return false;
    }

    let normal = offset / dist;
    puck.pos += normal * (min_dist - dist);

    let v_norm = (puck.vel - paddle.vel).dot(normal);
    if v_norm < 0.0 {
        let impulse = -(1.0 + config.paddle_restitution) * v_norm;
        puck.vel += normal * impulse;

        // Opponent returns are always hit hard toward the player
        if side == Side::Opponent && puck.vel.y > 0.0 {
            puck.vel.y += config.smash_boost;
        }
    }

    puck.vel = puck.vel.clamp_length_max(config.max_puck_speed);

    log::trace!(
        "contact {:?}: depth {:.2}, v_norm {:.2}, puck vel {:?}",
        side,
        min_dist - dist,
        v_norm,
        puck.vel
    );
    true
}

/// Check puck collisions with walls and paddles
pub fn check_collisions(
    world: &mut World,
    table: &Table,
    config: &Config,
    time: &Time,
    events: &mut Events,
) {
    // Collect paddle data first, opponent before player
    let mut paddles: Vec<(Side, Body)> = world
        .query::<(&Paddle, &Body)>()
        .iter()
        .map(|(_e, (paddle, body))| (paddle.side, *body))
        .collect();
    paddles.sort_by_key(|(side, _)| *side != Side::Opponent);

    for (_entity, (_puck, puck)) in world.query_mut::<(&Puck, &mut Body)>() {
        let mut walled = bounce_walls(puck, table, config.wall_restitution);

        for (side, paddle) in &paddles {
            if resolve_paddle_contact(puck, paddle, *side, config) {
                events.emit(GameEvent::Hit { side: *side }, time.now);
            }
        }

        // A paddle push can land the puck past a wall; one wall event per tick
        walled |= bounce_walls(puck, table, config.wall_restitution);
        if walled {
            events.emit(GameEvent::Wall, time.now);
        }
    }
}
