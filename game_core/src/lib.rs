//! Air-hockey simulation core
//!
//! One puck and two paddles on a fixed table. The player steers toward a
//! pointer target, the opponent follows a heuristic controller, and the
//! [`Match`] drives the round and scoring state machine. Rendering and audio
//! live outside this crate: they read positions and drain [`GameEvent`]s.

pub mod components;
pub mod config;
pub mod error;
pub mod fsm;
pub mod game;
pub mod params;
pub mod projection;
pub mod resources;
pub mod systems;
pub mod table;

pub use components::*;
pub use config::*;
pub use error::*;
pub use fsm::*;
pub use game::*;
pub use params::*;
pub use projection::*;
pub use resources::*;
pub use systems::*;
pub use table::*;

use glam::Vec2;
use hecs::World;

/// Run one simulation tick of `time.dt` reference frames
///
/// Returns the scorer if a goal ended the round; remaining sub-steps are
/// skipped in that case.
pub fn step(
    world: &mut World,
    time: &mut Time,
    table: &Table,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    input_queue: &mut InputQueue,
) -> Option<Side> {
    // Clamp dt to prevent large jumps
    let clamped_dt = time.dt.clamp(0.0, Params::MAX_DT);

    // 1. Latest pointer target becomes the player's intent
    ingest_inputs(world, input_queue);

    // Sub-steps keep per-step travel below the contact distance
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;
        time.advance(step_dt);

        // 2. Opponent picks a target and moves
        drive_opponent(world, time, table, config);

        // 3. Player paddle follows its target
        move_player_paddle(world, time, table, config);

        // 4. Puck integration with friction
        move_puck(world, time, config);

        // 5. Walls, then paddles
        check_collisions(world, table, config, time, events);

        // 6. Goal line
        if let Some(scorer) = check_scoring(world, table, score, events, time) {
            return Some(scorer);
        }
    }

    None
}

/// Helper to create the puck entity
pub fn create_puck(world: &mut World, pos: Vec2, vel: Vec2, config: &Config) -> hecs::Entity {
    world.spawn((Puck, Body::new(pos, vel, config.puck_radius)))
}

/// Helper to create a paddle entity resting at `pos`
pub fn create_paddle(world: &mut World, side: Side, pos: Vec2, config: &Config) -> hecs::Entity {
    world.spawn((
        Paddle::new(side),
        Body::new(pos, Vec2::ZERO, config.paddle_radius),
        PaddleIntent::new(pos),
    ))
}

/// Helper to create the opponent paddle with its controller
pub fn create_opponent(world: &mut World, pos: Vec2, speed: f32, config: &Config) -> hecs::Entity {
    world.spawn((
        Paddle::new(Side::Opponent),
        Body::new(pos, Vec2::ZERO, config.paddle_radius),
        PaddleIntent::new(pos),
        OpponentBrain::new(speed),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (World, Time, Table, Config, Score, Events, InputQueue) {
        let config = Config::new();
        (
            World::new(),
            Time::new(1.0, 0.0),
            Table::new(&config),
            config,
            Score::new(),
            Events::new(0.0),
            InputQueue::new(),
        )
    }

    #[test]
    fn test_step_zero_dt_only_ingests_input() {
        let (mut world, mut time, table, config, mut score, mut events, mut input) = setup();
        let player = create_paddle(&mut world, Side::Player, Vec2::new(0.0, 400.0), &config);
        let puck = create_puck(&mut world, Vec2::ZERO, Vec2::new(3.0, 0.0), &config);
        input.push_target(Vec2::new(50.0, 350.0));
        time.dt = 0.0;

        let scorer = step(&mut world, &mut time, &table, &config, &mut score, &mut events, &mut input);

        assert_eq!(scorer, None);
        assert_eq!(world.get::<&Body>(puck).unwrap().pos, Vec2::ZERO);
        assert_eq!(
            world.get::<&PaddleIntent>(player).unwrap().target,
            Vec2::new(50.0, 350.0)
        );
    }

    #[test]
    fn test_step_clamps_large_dt() {
        let (mut world, mut time, table, config, mut score, mut events, mut input) = setup();
        let puck = create_puck(&mut world, Vec2::ZERO, Vec2::new(0.0, 10.0), &config);
        time.dt = 100.0;

        step(&mut world, &mut time, &table, &config, &mut score, &mut events, &mut input);

        let y = world.get::<&Body>(puck).unwrap().pos.y;
        assert!(y < 10.0 * Params::MAX_DT + 1e-3, "moved {y}");
        assert!((time.now - Params::MAX_DT as f64 * Params::FRAME_MS).abs() < 1e-6);
    }

    #[test]
    fn test_step_stops_after_goal() {
        let (mut world, mut time, table, config, mut score, mut events, mut input) = setup();
        create_puck(&mut world, Vec2::new(0.0, -520.0), Vec2::new(0.0, -10.0), &config);
        time.dt = 3.0;

        let scorer = step(&mut world, &mut time, &table, &config, &mut score, &mut events, &mut input);

        assert_eq!(scorer, Some(Side::Player));
        assert_eq!(score.player, 1, "Only one goal per round");
        assert!((time.now - Params::FRAME_MS).abs() < 1e-6, "Stopped after first sub-step");
    }

    #[test]
    fn test_step_fractional_dt_substeps() {
        let (mut world, mut time, table, config, mut score, mut events, mut input) = setup();
        let puck = create_puck(&mut world, Vec2::ZERO, Vec2::new(0.0, 10.0), &config);
        time.dt = 2.5;

        step(&mut world, &mut time, &table, &config, &mut score, &mut events, &mut input);

        // Same decay as a single 2.5 frame integration
        let vel = world.get::<&Body>(puck).unwrap().vel.y;
        assert!((vel - 10.0 * config.friction.powf(2.5)).abs() < 1e-4);
    }
}
