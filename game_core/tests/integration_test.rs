use game_core::*;
use glam::Vec2;
use hecs::World;

struct Sim {
    world: World,
    time: Time,
    table: Table,
    config: Config,
    score: Score,
    events: Events,
    input: InputQueue,
}

impl Sim {
    fn new() -> Self {
        let config = Config::new();
        Self {
            world: World::new(),
            time: Time::default(),
            table: Table::new(&config),
            events: Events::new(config.hit_interval_ms),
            config,
            score: Score::new(),
            input: InputQueue::new(),
        }
    }

    fn step(&mut self, dt: f32) -> Option<Side> {
        self.time.dt = dt;
        step(
            &mut self.world,
            &mut self.time,
            &self.table,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.input,
        )
    }

    fn body(&self, entity: hecs::Entity) -> Body {
        *self.world.get::<&Body>(entity).unwrap()
    }
}

#[test]
fn test_puck_through_goal_mouth_scores_for_player() {
    let mut sim = Sim::new();
    let puck = create_puck(&mut sim.world, Vec2::new(0.0, -490.0), Vec2::new(0.0, -5.0), &sim.config);

    // First tick: no end-wall bounce inside the mouth
    assert_eq!(sim.step(1.0), None);
    assert!(sim.body(puck).vel.y < 0.0);
    assert!(!sim.events.contains(GameEvent::Wall));

    let mut scorer = None;
    for _ in 0..20 {
        scorer = sim.step(1.0);
        if scorer.is_some() {
            break;
        }
    }

    assert_eq!(scorer, Some(Side::Player));
    assert_eq!(sim.score.player, 1);
    assert_eq!(sim.score.opponent, 0);
    assert!(sim.body(puck).pos.y < -525.0);
    assert!(sim.events.contains(GameEvent::Goal {
        scorer: Side::Player
    }));
}

#[test]
fn test_puck_beside_goal_bounces_off_end_wall() {
    let mut sim = Sim::new();
    let puck = create_puck(&mut sim.world, Vec2::new(140.0, -495.0), Vec2::new(0.0, -5.0), &sim.config);

    assert_eq!(sim.step(1.0), None);

    let body = sim.body(puck);
    assert_eq!(body.pos.y, -475.0);
    // 5 * friction, reflected with 0.85 restitution
    assert!((body.vel.y - 5.0 * 0.993 * 0.85).abs() < 1e-4, "vy = {}", body.vel.y);
    assert_eq!(sim.events.drain(), vec![GameEvent::Wall]);
    assert_eq!(sim.score, Score::new());
}

#[test]
fn test_opponent_clears_stalled_puck_from_behind() {
    let mut sim = Sim::new();
    create_puck(&mut sim.world, Vec2::new(0.0, -450.0), Vec2::ZERO, &sim.config);
    let opponent = create_opponent(&mut sim.world, Vec2::new(0.0, -400.0), 11.0, &sim.config);

    sim.step(1.0);

    let brain = *sim.world.get::<&OpponentBrain>(opponent).unwrap();
    let intent = *sim.world.get::<&PaddleIntent>(opponent).unwrap();
    assert_eq!(brain.branch, OpponentBranch::ReboundClear);
    assert!(intent.target.y < -450.0, "Target should sit behind the puck");
    assert!(intent.target.x < 0.0, "Strike from the centre side");
}

#[test]
fn test_player_paddle_respects_speed_limit_and_half() {
    let mut sim = Sim::new();
    let player = create_paddle(&mut sim.world, Side::Player, Vec2::new(0.0, 400.0), &sim.config);

    // Far outside the table, in the opponent's half
    sim.input.push_target(Vec2::new(-900.0, -900.0));
    for _ in 0..40 {
        let before = sim.body(player).pos;
        sim.step(1.0);
        let after = sim.body(player).pos;
        assert!((after - before).length() <= sim.config.paddle_speed_limit + 1e-3);
        assert!(sim.table.paddle_zone(Side::Player).contains(after));
    }

    let corner = Vec2::new(-255.0, 45.0);
    assert!((sim.body(player).pos - corner).length() < 1e-3);
}

#[test]
fn test_paddle_sweep_into_side_wall_keeps_puck_on_table() {
    let mut sim = Sim::new();
    let player = create_paddle(&mut sim.world, Side::Player, Vec2::new(210.0, 300.0), &sim.config);
    let puck = create_puck(&mut sim.world, Vec2::new(270.0, 310.0), Vec2::ZERO, &sim.config);
    sim.input.push_target(Vec2::new(300.0, 300.0));

    sim.step(1.0);

    assert_eq!(sim.body(player).pos, Vec2::new(255.0, 300.0));
    let body = sim.body(puck);
    let limit = sim.table.half_width - body.radius;
    assert!(body.pos.x.abs() <= limit, "puck x {} beyond wall", body.pos.x);
    assert!(body.vel.x <= 0.0);
    assert!(sim.events.contains(GameEvent::Hit { side: Side::Player }));
    assert!(sim.events.contains(GameEvent::Wall));
}

#[test]
fn test_repeated_contact_hits_are_rate_limited() {
    let mut sim = Sim::new();
    create_paddle(&mut sim.world, Side::Player, Vec2::new(0.0, 300.0), &sim.config);
    let puck = create_puck(&mut sim.world, Vec2::new(0.0, 240.0), Vec2::new(0.0, 1.0), &sim.config);

    sim.step(1.0);
    assert!(sim.events.contains(GameEvent::Hit { side: Side::Player }));
    sim.events.clear();

    // Shove the puck back into the paddle one frame later
    {
        let mut body = sim.world.get::<&mut Body>(puck).unwrap();
        body.pos = Vec2::new(0.0, 240.0);
        body.vel = Vec2::new(0.0, 1.0);
    }
    sim.step(1.0);
    assert!(sim.events.is_empty(), "Second hit within 80 ms is dropped");
}

#[test]
fn test_hit_interval_counts_simulation_time_on_clamped_frames() {
    let mut sim = Sim::new();
    create_paddle(&mut sim.world, Side::Player, Vec2::new(0.0, 300.0), &sim.config);
    let puck = create_puck(&mut sim.world, Vec2::new(0.0, 240.0), Vec2::new(0.0, 1.0), &sim.config);

    // Each slow frame is clamped to 4 reference frames, about 66.7 ms
    let mut hits = Vec::new();
    for _ in 0..3 {
        {
            let mut body = sim.world.get::<&mut Body>(puck).unwrap();
            body.pos = Vec2::new(0.0, 240.0);
            body.vel = Vec2::new(0.0, 1.0);
        }
        sim.step(10.0);
        let count = sim
            .events
            .drain()
            .into_iter()
            .filter(|event| matches!(event, GameEvent::Hit { .. }))
            .count();
        hits.push(count);
    }

    assert_eq!(hits, vec![1, 0, 1]);
    assert!((sim.time.now - 12.0 * Params::FRAME_MS).abs() < 1e-6);
}

#[test]
fn test_full_match_invariants() {
    let mut game = Match::new(Config::new(), 42).unwrap();
    game.start(Difficulty::Expert).unwrap();
    let table = *game.table();
    let cap = game.config().max_puck_speed;

    let mut t = 0.0;
    for _ in 0..20_000 {
        if game.phase() == MatchPhase::GameOver {
            break;
        }

        // Keep the paddle between the puck and the near goal
        if let Some(puck) = game.puck() {
            game.set_player_target(Vec2::new(puck.pos.x, (puck.pos.y + 80.0).max(300.0)));
        }
        t += Params::FRAME_MS;
        game.tick(t);

        let snap = game.snapshot();
        assert!(snap.puck.speed() <= cap + 1e-3, "speed {}", snap.puck.speed());
        assert!(
            snap.puck.pos.x.abs() <= table.half_width - snap.puck.radius,
            "puck x {}",
            snap.puck.pos.x
        );
        assert!(table.paddle_zone(Side::Player).contains(snap.player.pos));
        assert!(table.paddle_zone(Side::Opponent).contains(snap.opponent.pos));
        assert!(snap.score.player <= 7 && snap.score.opponent <= 7);
        game.drain_events();
    }

    if let Some(result) = game.final_score() {
        assert_eq!(result.player.max(result.opponent), 7);
        assert_eq!(result.to_string(), format!("{} - {}", result.player, result.opponent));
    }
}

#[test]
fn test_seven_nil_match_reports_win() {
    let mut game = Match::new(Config::new(), 3).unwrap();
    game.start(Difficulty::Beginner).unwrap();

    let mut t = 0.0;
    while game.phase() != MatchPhase::GameOver {
        if game.phase() == MatchPhase::Playing {
            game.place_puck(Vec2::new(0.0, -520.0), Vec2::new(0.0, -10.0));
        }
        t += Params::FRAME_MS;
        game.tick(t);
        assert!(t < 60_000.0, "match should end");
    }

    assert_eq!(game.score().player, 7);
    assert_eq!(game.score().opponent, 0);
    let result = game.final_score().unwrap();
    assert_eq!(result.to_string(), "7 - 0");
    assert_eq!(result.headline(), "YOU WIN!");
}

#[test]
fn test_config_from_toml_drives_match() {
    let config = Config::from_toml_str("winning_score = 1\nreset_delay_ms = 500.0\n").unwrap();
    let mut game = Match::new(config, 9).unwrap();
    game.start(Difficulty::Configured).unwrap();

    game.place_puck(Vec2::new(0.0, 520.0), Vec2::new(0.0, 10.0));
    game.advance(1.0);

    assert_eq!(game.phase(), MatchPhase::GameOver);
    let result = game.final_score().unwrap();
    assert_eq!(result.headline(), "GAME OVER");
    assert_eq!(result.to_string(), "0 - 1");
}
