use glam::Vec2;
use hecs::World;

use crate::{
    capped_step, move_paddle, Body, Config, InputQueue, Paddle, PaddleIntent, Projection, Side,
    Table, Time,
};

/// Map a pointer position in screen pixels to a table-space target
pub fn pointer_to_target(projection: &Projection, screen_x: f32, screen_y: f32) -> Vec2 {
    projection.screen_to_world(screen_x, screen_y)
}

/// Apply the latest queued pointer target to the player's paddle intent
pub fn ingest_inputs(world: &mut World, input_queue: &mut InputQueue) {
    let Some(target) = input_queue.take() else {
        return;
    };

    for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
        if paddle.side == Side::Player {
            intent.target = target;
        }
    }
}

/// Move the player's paddle toward its target at no more than the speed limit
pub fn move_player_paddle(world: &mut World, time: &Time, table: &Table, config: &Config) {
    let zone = table.paddle_zone(Side::Player);
    let max_step = config.paddle_speed_limit * time.dt;

    for (_entity, (paddle, body, intent)) in
        world.query_mut::<(&Paddle, &mut Body, &PaddleIntent)>()
    {
        if paddle.side != Side::Player {
            continue;
        }
        let target = zone.clamp(intent.target);
        let step = capped_step(body.pos, target, max_step);
        move_paddle(body, step, &zone);
    }
}
