use std::fmt;

use glam::Vec2;

use crate::{Params, Side};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Reference frames in this step (1.0 = 16.666 ms)
    pub now: f64, // Total elapsed simulation time in ms
}

impl Time {
    pub fn new(dt: f32, now: f64) -> Self {
        Self { dt, now }
    }

    /// Advance the clock by `dt` reference frames
    pub fn advance(&mut self, dt: f32) {
        self.dt = dt;
        self.now += dt as f64 * Params::FRAME_MS;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self { dt: 1.0, now: 0.0 }
    }
}

/// Converts monotonic timestamps into frame-normalised `dt`
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// `dt` since the previous call; the first call after a reset yields 0
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / Params::FRAME_MS).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt
    }

    /// Forget the anchor so a pause does not become one huge step
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u8,
    pub opponent: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.opponent >= win_score {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// Final result once a match is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub player: u8,
    pub opponent: u8,
}

impl FinalScore {
    pub fn winner(&self) -> Side {
        if self.player > self.opponent {
            Side::Player
        } else {
            Side::Opponent
        }
    }

    pub fn headline(&self) -> &'static str {
        match self.winner() {
            Side::Player => "YOU WIN!",
            Side::Opponent => "GAME OVER",
        }
    }
}

impl From<Score> for FinalScore {
    fn from(score: Score) -> Self {
        Self {
            player: score.player,
            opponent: score.opponent,
        }
    }
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.player, self.opponent)
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Discrete notification for the audio and render layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Puck bounced off a side or end wall
    Wall,
    /// Puck touched a paddle
    Hit { side: Side },
    /// Puck crossed a goal line; `scorer` gets the point
    Goal { scorer: Side },
}

/// Drops hit events that arrive closer together than an interval
///
/// Timestamps are simulation milliseconds (`Time::now`), the clock the
/// contacts happen on. When a slow frame is clamped the window spans more
/// than `interval_ms` of wall time.
#[derive(Debug, Clone, Copy)]
pub struct HitFilter {
    interval_ms: f64,
    last_hit_ms: Option<f64>,
}

impl HitFilter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_hit_ms: None,
        }
    }

    pub fn allow(&mut self, now_ms: f64) -> bool {
        match self.last_hit_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_hit_ms = Some(now_ms);
                true
            }
        }
    }
}

impl Default for HitFilter {
    fn default() -> Self {
        Self::new(Params::HIT_INTERVAL_MS)
    }
}

/// Event queue drained by the consumer each frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    queue: Vec<GameEvent>,
    hit_filter: HitFilter,
}

impl Events {
    pub fn new(hit_interval_ms: f64) -> Self {
        Self {
            queue: Vec::new(),
            hit_filter: HitFilter::new(hit_interval_ms),
        }
    }

    /// Queue an event stamped with simulation time; hits pass through the
    /// rate limiter
    pub fn emit(&mut self, event: GameEvent, now_ms: f64) {
        if let GameEvent::Hit { .. } = event {
            if !self.hit_filter.allow(now_ms) {
                return;
            }
        }
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.queue.iter()
    }

    pub fn contains(&self, event: GameEvent) -> bool {
        self.queue.contains(&event)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Deadline for the deferred serve after a goal
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetTimer {
    deadline_ms: Option<f64>,
}

impl ResetTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline_ms = Some(now_ms + delay_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        matches!(self.deadline_ms, Some(deadline) if now_ms >= deadline)
    }

    pub fn clear(&mut self) {
        self.deadline_ms = None;
    }
}

/// Latest pointer target, applied at the start of the next tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputQueue {
    pending: Option<Vec2>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newer targets replace older ones
    pub fn push_target(&mut self, target: Vec2) {
        self.pending = Some(target);
    }

    pub fn take(&mut self) -> Option<Vec2> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment() {
        let mut score = Score::new();
        score.increment(Side::Player);
        score.increment(Side::Player);
        score.increment(Side::Opponent);
        assert_eq!(score.get(Side::Player), 2);
        assert_eq!(score.get(Side::Opponent), 1);
    }

    #[test]
    fn test_score_has_winner() {
        let mut score = Score::new();
        for _ in 0..6 {
            score.increment(Side::Opponent);
        }
        assert_eq!(score.has_winner(7), None, "No winner below threshold");
        score.increment(Side::Opponent);
        assert_eq!(score.has_winner(7), Some(Side::Opponent));
    }

    #[test]
    fn test_final_score_display() {
        let result = FinalScore {
            player: 7,
            opponent: 0,
        };
        assert_eq!(result.to_string(), "7 - 0");
        assert_eq!(result.winner(), Side::Player);
        assert_eq!(result.headline(), "YOU WIN!");

        let result = FinalScore {
            player: 3,
            opponent: 7,
        };
        assert_eq!(result.headline(), "GAME OVER");
    }

    #[test]
    fn test_frame_clock_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(5000.0), 0.0);
        let dt = clock.tick(5000.0 + Params::FRAME_MS * 2.0);
        assert!((dt - 2.0).abs() < 1e-5);

        clock.reset();
        assert_eq!(clock.tick(9000.0), 0.0);
    }

    #[test]
    fn test_frame_clock_ignores_backwards_time() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0), 0.0);
    }

    #[test]
    fn test_hit_filter_rate_limits() {
        let mut events = Events::new(80.0);
        let hit = GameEvent::Hit { side: Side::Player };
        events.emit(hit, 0.0);
        events.emit(hit, 40.0);
        events.emit(GameEvent::Wall, 40.0);
        events.emit(hit, 85.0);

        assert_eq!(events.drain(), vec![hit, GameEvent::Wall, hit]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_reset_timer_deadline() {
        let mut timer = ResetTimer::new();
        assert!(!timer.is_due(1e9));
        timer.start(100.0, 1000.0);
        assert!(timer.is_pending());
        assert!(!timer.is_due(1099.0));
        assert!(timer.is_due(1100.0));
        timer.clear();
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_input_queue_keeps_latest() {
        let mut queue = InputQueue::new();
        queue.push_target(Vec2::new(1.0, 2.0));
        queue.push_target(Vec2::new(3.0, 4.0));
        assert_eq!(queue.take(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(queue.take(), None);
    }

    #[test]
    fn test_time_advance() {
        let mut time = Time::default();
        time.advance(2.0);
        assert_eq!(time.dt, 2.0);
        assert!((time.now - 2.0 * Params::FRAME_MS).abs() < 1e-9);
    }
}
