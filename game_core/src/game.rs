use glam::Vec2;
use hecs::{Entity, World};

use crate::{
    create_opponent, create_paddle, create_puck, pointer_to_target, step, Body, Config,
    ConfigError, Events, FinalScore, FrameClock, GameEvent, GameRng, InputQueue, MatchAction,
    MatchError, MatchFsm, MatchPhase, OpponentBrain, OpponentBranch, Paddle, PaddleIntent, Params,
    Projection, ResetTimer, Score, Side, Table, Time,
};

/// Opponent strength, chosen when a match starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Expert,
    /// Use `Config::opponent_speed`
    Configured,
}

impl Difficulty {
    /// Opponent speed cap in units per reference frame
    pub fn opponent_speed(self, config: &Config) -> f32 {
        match self {
            Difficulty::Beginner => Params::OPPONENT_SPEED_BEGINNER,
            Difficulty::Expert => Params::OPPONENT_SPEED_EXPERT,
            Difficulty::Configured => config.opponent_speed,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub phase: MatchPhase,
    pub score: Score,
    pub puck: Body,
    pub player: Body,
    pub opponent: Body,
}

/// Match controller: owns the simulation and the round/score lifecycle
pub struct Match {
    world: World,
    puck: Entity,
    player: Entity,
    opponent: Entity,
    time: Time,
    table: Table,
    config: Config,
    score: Score,
    events: Events,
    input_queue: InputQueue,
    rng: GameRng,
    fsm: MatchFsm,
    reset_timer: ResetTimer,
    clock: FrameClock,
    difficulty: Option<Difficulty>,
    last_scorer: Option<Side>,
}

impl Match {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let table = Table::new(&config);
        let mut world = World::new();

        let player_home = Paddle::home(Side::Player, &config);
        let opponent_home = Paddle::home(Side::Opponent, &config);
        let player = create_paddle(&mut world, Side::Player, player_home, &config);
        let opponent =
            create_opponent(&mut world, opponent_home, config.opponent_speed, &config);
        let puck = create_puck(&mut world, Vec2::ZERO, Vec2::ZERO, &config);

        Ok(Self {
            world,
            puck,
            player,
            opponent,
            time: Time::new(0.0, 0.0),
            table,
            events: Events::new(config.hit_interval_ms),
            config,
            score: Score::new(),
            input_queue: InputQueue::new(),
            rng: GameRng::new(seed),
            fsm: MatchFsm::new(),
            reset_timer: ResetTimer::new(),
            clock: FrameClock::new(),
            difficulty: None,
            last_scorer: None,
        })
    }

    pub fn phase(&self) -> MatchPhase {
        self.fsm.phase()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Simulation time in ms
    pub fn now(&self) -> f64 {
        self.time.now
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn last_scorer(&self) -> Option<Side> {
        self.last_scorer
    }

    /// Leave the menu with a difficulty and serve the first puck
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), MatchError> {
        self.apply(MatchAction::Start)?;

        let speed = difficulty.opponent_speed(&self.config);
        self.difficulty = Some(difficulty);
        self.score = Score::new();
        self.last_scorer = None;
        self.events.clear();
        self.reset_timer.clear();
        self.clock.reset();
        self.home_paddles();
        if let Ok(mut brain) = self.world.get::<&mut OpponentBrain>(self.opponent) {
            *brain = OpponentBrain::new(speed);
        }
        // First serve goes to the opponent, as after a player goal
        self.serve(Side::Opponent);

        log::info!("match started: {:?}, opponent speed {}", difficulty, speed);
        Ok(())
    }

    /// Return to the menu after game over
    pub fn replay(&mut self) -> Result<(), MatchError> {
        self.apply(MatchAction::Replay)?;

        self.score = Score::new();
        self.difficulty = None;
        self.last_scorer = None;
        self.reset_timer.clear();
        self.home_paddles();
        if let Ok(mut puck) = self.world.get::<&mut Body>(self.puck) {
            puck.pos = Vec2::ZERO;
            puck.vel = Vec2::ZERO;
        }
        Ok(())
    }

    /// Set the player's paddle target in table space
    pub fn set_player_target(&mut self, target: Vec2) {
        self.input_queue.push_target(target);
    }

    /// Set the player's paddle target from a pointer position in pixels
    pub fn set_pointer(&mut self, projection: &Projection, screen_x: f32, screen_y: f32) {
        self.set_player_target(pointer_to_target(projection, screen_x, screen_y));
    }

    /// Advance to a monotonic timestamp (ms), e.g. one display refresh
    pub fn tick(&mut self, timestamp_ms: f64) {
        let dt = self.clock.tick(timestamp_ms);
        self.advance(dt);
    }

    /// Advance by `dt` reference frames
    pub fn advance(&mut self, dt: f32) {
        match self.fsm.phase() {
            MatchPhase::Playing => {
                self.time.dt = dt;
                let scorer = step(
                    &mut self.world,
                    &mut self.time,
                    &self.table,
                    &self.config,
                    &mut self.score,
                    &mut self.events,
                    &mut self.input_queue,
                );
                if let Some(scorer) = scorer {
                    self.on_goal(scorer);
                }
            }
            MatchPhase::Scored => {
                self.time.advance(dt.clamp(0.0, Params::MAX_DT));
                if self.reset_timer.is_due(self.time.now) {
                    self.next_round();
                }
            }
            MatchPhase::Menu | MatchPhase::GameOver => {}
        }
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Final score once the match is over
    pub fn final_score(&self) -> Option<FinalScore> {
        self.fsm.is_game_over().then(|| self.score.into())
    }

    pub fn puck(&self) -> Option<Body> {
        self.body(self.puck)
    }

    pub fn paddle(&self, side: Side) -> Option<Body> {
        match side {
            Side::Player => self.body(self.player),
            Side::Opponent => self.body(self.opponent),
        }
    }

    pub fn opponent_branch(&self) -> Option<OpponentBranch> {
        self.world
            .get::<&OpponentBrain>(self.opponent)
            .map(|brain| brain.branch)
            .ok()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            score: self.score,
            puck: self.puck().unwrap_or_default(),
            player: self.paddle(Side::Player).unwrap_or_default(),
            opponent: self.paddle(Side::Opponent).unwrap_or_default(),
        }
    }

    /// Put the puck somewhere specific, e.g. for drills
    pub fn place_puck(&mut self, pos: Vec2, vel: Vec2) {
        if let Ok(mut puck) = self.world.get::<&mut Body>(self.puck) {
            puck.pos = pos;
            puck.vel = vel;
        }
    }

    fn body(&self, entity: Entity) -> Option<Body> {
        self.world.get::<&Body>(entity).map(|body| *body).ok()
    }

    /// Move the phase machine; a rejected action leaves the phase unchanged
    fn apply(&mut self, action: MatchAction) -> Result<(), MatchError> {
        let result = self.fsm.transition(action);
        if result.success {
            Ok(())
        } else {
            Err(MatchError::InvalidTransition {
                from: result.from_phase,
                action: result.action,
            })
        }
    }

    fn on_goal(&mut self, scorer: Side) {
        self.last_scorer = Some(scorer);
        if self.apply(MatchAction::Goal).is_err() {
            return;
        }

        if self.score.has_winner(self.config.winning_score).is_some() {
            if self.apply(MatchAction::Win).is_ok() {
                let result = FinalScore::from(self.score);
                log::info!("match over: {} ({})", result, result.headline());
            }
        } else {
            log::info!(
                "{:?} scored, {} - {}",
                scorer,
                self.score.player,
                self.score.opponent
            );
            self.reset_timer
                .start(self.time.now, self.config.reset_delay_ms);
        }
    }

    fn next_round(&mut self) {
        if self.apply(MatchAction::Serve).is_err() {
            return;
        }
        self.reset_timer.clear();
        // The side that conceded receives the serve
        let loser = self.last_scorer.map_or(Side::Opponent, Side::other);
        self.serve(loser);
        // Re-anchor so the pause is not integrated as one long frame
        self.clock.reset();
    }

    fn serve(&mut self, loser: Side) {
        if let Ok(mut puck) = self.world.get::<&mut Body>(self.puck) {
            puck.serve(loser, &mut self.rng);
        }
    }

    fn home_paddles(&mut self) {
        for (_entity, (paddle, body, intent)) in self
            .world
            .query_mut::<(&Paddle, &mut Body, &mut PaddleIntent)>()
        {
            let home = Paddle::home(paddle.side, &self.config);
            body.pos = home;
            body.vel = Vec2::ZERO;
            intent.target = home;
        }
    }
}
