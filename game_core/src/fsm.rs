//! Match State Machine
//!
//! MENU -> PLAYING -> SCORED -> PLAYING ... -> GAMEOVER -> MENU

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Menu,
    Playing,
    Scored,
    GameOver,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    /// Difficulty chosen, first serve
    Start,
    /// Puck crossed a goal line
    Goal,
    /// Reset delay elapsed, next serve
    Serve,
    /// A score reached the winning threshold
    Win,
    /// Back to the menu after game over
    Replay,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_phase: MatchPhase,
    pub to_phase: MatchPhase,
    pub action: MatchAction,
}

/// Match finite state machine
#[derive(Debug, Clone)]
pub struct MatchFsm {
    phase: MatchPhase,
}

impl MatchFsm {
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::Menu,
        }
    }

    /// Get current phase
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from_phase = self.phase;

        if let Some(next_phase) = self.get_next_phase(action) {
            self.phase = next_phase;
            log::info!("match: {:?} --{:?}--> {:?}", from_phase, action, next_phase);
            TransitionResult {
                success: true,
                from_phase,
                to_phase: next_phase,
                action,
            }
        } else {
            log::warn!("match: rejected {:?} in {:?}", action, from_phase);
            TransitionResult {
                success: false,
                from_phase,
                to_phase: from_phase,
                action,
            }
        }
    }

    /// Get next phase for a given action (if valid)
    fn get_next_phase(&self, action: MatchAction) -> Option<MatchPhase> {
        match (self.phase, action) {
            (MatchPhase::Menu, MatchAction::Start) => Some(MatchPhase::Playing),
            (MatchPhase::Playing, MatchAction::Goal) => Some(MatchPhase::Scored),
            (MatchPhase::Scored, MatchAction::Serve) => Some(MatchPhase::Playing),
            (MatchPhase::Scored, MatchAction::Win) => Some(MatchPhase::GameOver),
            (MatchPhase::GameOver, MatchAction::Replay) => Some(MatchPhase::Menu),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }
}

impl Default for MatchFsm {
    fn default() -> Self {
        Self::new()
    }
}
