//! Browser bindings for the air-hockey core
//!
//! The page owns the canvas, the render loop and audio. Each animation frame
//! it calls `tick` with the frame timestamp, reads `frame` to draw, and plays
//! sounds for the codes returned by `drain_events`.
//!
//! Note: only built for wasm32

#![cfg(target_arch = "wasm32")]

mod logger;

use std::cell::RefCell;

use game_core::{Body, Config, Difficulty, GameEvent, Match, MatchPhase, Projection, Side};
use wasm_bindgen::prelude::*;

/// Floats per body in `frame`: screen x, screen y, radius in pixels
const BODY_STRIDE: usize = 3;

/// Event codes for the audio layer
const EVENT_WALL: u8 = 0;
const EVENT_HIT_PLAYER: u8 = 1;
const EVENT_HIT_OPPONENT: u8 = 2;
const EVENT_GOAL_PLAYER: u8 = 3;
const EVENT_GOAL_OPPONENT: u8 = 4;

/// Main client state
pub struct Client {
    game: Match,
    projection: Projection,
}

impl Client {
    pub fn new(width: f32, height: f32, config_toml: Option<String>) -> Result<Self, JsValue> {
        let config = match config_toml {
            Some(text) => Config::from_toml_str(&text).map_err(to_js)?,
            None => Config::new(),
        };

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let projection = Projection::fit(width, height, &config);
        let game = Match::new(config, seed).map_err(to_js)?;

        Ok(Self { game, projection })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.projection.resize(width, height, self.game.config());
    }

    pub fn start(&mut self, difficulty: &str) -> Result<(), JsValue> {
        let difficulty = match difficulty {
            "beginner" => Difficulty::Beginner,
            "expert" => Difficulty::Expert,
            "configured" => Difficulty::Configured,
            other => {
                return Err(JsValue::from_str(&format!(
                    "Unknown difficulty: {}",
                    other
                )))
            }
        };
        self.game.start(difficulty).map_err(to_js)
    }

    pub fn replay(&mut self) -> Result<(), JsValue> {
        self.game.replay().map_err(to_js)
    }

    pub fn pointer_move(&mut self, screen_x: f32, screen_y: f32) {
        self.game.set_pointer(&self.projection, screen_x, screen_y);
    }

    pub fn tick(&mut self, timestamp_ms: f64) {
        self.game.tick(timestamp_ms);
    }

    /// Puck, player paddle, opponent paddle, projected for drawing
    pub fn frame(&self) -> Vec<f32> {
        let snapshot = self.game.snapshot();
        let mut out = Vec::with_capacity(BODY_STRIDE * 3);
        for body in [snapshot.puck, snapshot.player, snapshot.opponent] {
            self.push_body(&mut out, &body);
        }
        out
    }

    /// Table-space centres: puck, player, opponent
    pub fn positions(&self) -> Vec<f32> {
        let snapshot = self.game.snapshot();
        [snapshot.puck, snapshot.player, snapshot.opponent]
            .iter()
            .flat_map(|body| [body.pos.x, body.pos.y])
            .collect()
    }

    fn push_body(&self, out: &mut Vec<f32>, body: &Body) {
        let point = self.projection.world_to_screen(body.pos);
        out.extend_from_slice(&[
            point.x,
            point.y,
            point.radius_px(body.radius, &self.projection),
        ]);
    }

    pub fn drain_events(&mut self) -> Vec<u8> {
        self.game
            .drain_events()
            .into_iter()
            .map(|event| match event {
                GameEvent::Wall => EVENT_WALL,
                GameEvent::Hit { side: Side::Player } => EVENT_HIT_PLAYER,
                GameEvent::Hit {
                    side: Side::Opponent,
                } => EVENT_HIT_OPPONENT,
                GameEvent::Goal {
                    scorer: Side::Player,
                } => EVENT_GOAL_PLAYER,
                GameEvent::Goal {
                    scorer: Side::Opponent,
                } => EVENT_GOAL_OPPONENT,
            })
            .collect()
    }

    pub fn phase(&self) -> String {
        match self.game.phase() {
            MatchPhase::Menu => "menu",
            MatchPhase::Playing => "playing",
            MatchPhase::Scored => "scored",
            MatchPhase::GameOver => "gameover",
        }
        .to_string()
    }

    pub fn score(&self) -> Vec<u8> {
        let score = self.game.score();
        vec![score.player, score.opponent]
    }

    /// "YOU WIN!" or "GAME OVER" once the match is over
    pub fn result_headline(&self) -> Option<String> {
        self.game
            .final_score()
            .map(|result| result.headline().to_string())
    }

    /// Final score line, e.g. "7 - 3"
    pub fn result_score(&self) -> Option<String> {
        self.game.final_score().map(|result| result.to_string())
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// Global client storage for WASM bindings
thread_local! {
    static CLIENT: RefCell<Option<Client>> = const { RefCell::new(None) };
}

fn with_client<T>(f: impl FnOnce(&mut Client) -> Result<T, JsValue>) -> Result<T, JsValue> {
    CLIENT.with(|cell| match cell.borrow_mut().as_mut() {
        Some(client) => f(client),
        None => Err(JsValue::from_str("Client not initialized")),
    })
}

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Create the game for a viewport; `config_toml` overrides tuning values
#[wasm_bindgen]
pub fn init_client(width: f32, height: f32, config_toml: Option<String>) -> Result<(), JsValue> {
    let client = Client::new(width, height, config_toml)?;
    CLIENT.with(|cell| *cell.borrow_mut() = Some(client));
    log::info!("client ready: {}x{}", width, height);
    Ok(())
}

#[wasm_bindgen]
pub fn set_log_level(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logger::init(level);
}

#[wasm_bindgen]
pub fn resize(width: f32, height: f32) -> Result<(), JsValue> {
    with_client(|client| {
        client.resize(width, height);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn start_match(difficulty: &str) -> Result<(), JsValue> {
    with_client(|client| client.start(difficulty))
}

#[wasm_bindgen]
pub fn replay() -> Result<(), JsValue> {
    with_client(|client| client.replay())
}

#[wasm_bindgen]
pub fn pointer_move(screen_x: f32, screen_y: f32) -> Result<(), JsValue> {
    with_client(|client| {
        client.pointer_move(screen_x, screen_y);
        Ok(())
    })
}

/// Advance to a `requestAnimationFrame` timestamp
#[wasm_bindgen]
pub fn tick(timestamp_ms: f64) -> Result<(), JsValue> {
    with_client(|client| {
        client.tick(timestamp_ms);
        Ok(())
    })
}

/// Advance using `performance.now()` when no frame timestamp is at hand
#[wasm_bindgen]
pub fn tick_now() -> Result<(), JsValue> {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .ok_or_else(|| JsValue::from_str("performance.now unavailable"))?;
    tick(now)
}

#[wasm_bindgen]
pub fn frame() -> Result<Vec<f32>, JsValue> {
    with_client(|client| Ok(client.frame()))
}

#[wasm_bindgen]
pub fn positions() -> Result<Vec<f32>, JsValue> {
    with_client(|client| Ok(client.positions()))
}

#[wasm_bindgen]
pub fn drain_events() -> Result<Vec<u8>, JsValue> {
    with_client(|client| Ok(client.drain_events()))
}

#[wasm_bindgen]
pub fn phase() -> Result<String, JsValue> {
    with_client(|client| Ok(client.phase()))
}

#[wasm_bindgen]
pub fn score() -> Result<Vec<u8>, JsValue> {
    with_client(|client| Ok(client.score()))
}

#[wasm_bindgen]
pub fn result_headline() -> Result<Option<String>, JsValue> {
    with_client(|client| Ok(client.result_headline()))
}

#[wasm_bindgen]
pub fn result_score() -> Result<Option<String>, JsValue> {
    with_client(|client| Ok(client.result_score()))
}
