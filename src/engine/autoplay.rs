//! Auto-play session bookkeeping
//!
//! A session is a sub-mode of the round state machine, not a second machine:
//! it only decides, at each round boundary, whether the next round starts on
//! its own.

use serde::{Deserialize, Serialize};

use crate::settings::SpeedMode;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Player asked to stop
    Requested,
    /// Every scheduled round was played
    Exhausted,
    /// Balance no longer covers the bet
    Unaffordable,
}

/// What happens at the end of a round while a session is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoPlayDecision {
    /// Deal the next round straight away
    Continue,
    Stop(StopReason),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPlaySession {
    pub rounds_target: u32,
    /// Rounds still to be dealt after the one in flight
    pub rounds_remaining: u32,
    pub stop_requested: bool,
    /// Restored when the session ends
    pub speed_before: SpeedMode,
}

impl AutoPlaySession {
    pub fn new(rounds_target: u32, speed_before: SpeedMode) -> Self {
        Self {
            rounds_target,
            rounds_remaining: rounds_target,
            stop_requested: false,
            speed_before,
        }
    }

    /// Count a round as dealt
    pub fn begin_round(&mut self) {
        self.rounds_remaining = self.rounds_remaining.saturating_sub(1);
    }

    /// Rounds dealt so far, including the one in flight
    pub fn rounds_played(&self) -> u32 {
        self.rounds_target - self.rounds_remaining
    }

    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Decide at the round boundary. A stop request wins over the other checks.
    pub fn on_round_complete(&self, can_afford: bool) -> AutoPlayDecision {
        if self.stop_requested {
            AutoPlayDecision::Stop(StopReason::Requested)
        } else if self.rounds_remaining == 0 {
            AutoPlayDecision::Stop(StopReason::Exhausted)
        } else if !can_afford {
            AutoPlayDecision::Stop(StopReason::Unaffordable)
        } else {
            AutoPlayDecision::Continue
        }
    }
}
