/// Game tuning parameters for air hockey
///
/// Distances are table units, speeds are units per reference frame.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table
    pub const TABLE_WIDTH: f32 = 600.0;
    pub const TABLE_DEPTH: f32 = 1000.0;
    pub const GOAL_WIDTH: f32 = 260.0;
    pub const PERSPECTIVE: f32 = 0.7; // Scale of the far edge

    // Puck
    pub const PUCK_RADIUS: f32 = 25.0;
    pub const FRICTION: f32 = 0.993; // Velocity kept per reference frame
    pub const WALL_RESTITUTION: f32 = 0.85;
    pub const MAX_PUCK_SPEED: f32 = 60.0;

    // Paddles
    pub const PADDLE_RADIUS: f32 = 45.0;
    pub const PADDLE_RESTITUTION: f32 = 0.9;
    pub const PADDLE_SPEED_LIMIT: f32 = 55.0;
    pub const PADDLE_HOME_INSET: f32 = 100.0; // Home distance from own goal line

    // Opponent
    pub const OPPONENT_SPEED_BEGINNER: f32 = 8.0;
    pub const OPPONENT_SPEED_EXPERT: f32 = 11.0;
    pub const OPPONENT_APPROACH: f32 = 0.2; // Fraction of remaining distance per frame
    pub const SMASH_BOOST: f32 = 2.0;

    // Serve
    pub const SERVE_OFFSET: f32 = 200.0;
    pub const SERVE_SPEED: f32 = 2.0;
    pub const SERVE_LATERAL: f32 = 5.0; // Full width of the random lateral range

    // Match
    pub const WINNING_SCORE: u8 = 7;
    pub const RESET_DELAY_MS: f64 = 1000.0;
    pub const HIT_INTERVAL_MS: f64 = 80.0;

    // Time
    pub const FRAME_MS: f64 = 16.666; // One reference frame, dt = 1.0
    pub const FIXED_DT: f32 = 1.0; // Largest sub-step
    pub const MAX_DT: f32 = 4.0; // Clamp to prevent large jumps

    // Viewport
    pub const VIEWPORT_PADDING: f32 = 50.0;
    pub const VIEWPORT_FILL: f32 = 0.9;
}
