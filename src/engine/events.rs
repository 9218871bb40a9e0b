//! Engine inputs and outputs
//!
//! Everything a presentation layer sends in is an [`Input`]; everything the
//! engine wants shown comes back out as an [`EngineEvent`]. Presentation
//! requests are acknowledged later with exactly one [`Completion`] each.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::autoplay::StopReason;
use super::round::{ResultRecord, RoundPhase};
use crate::consts::CARD_COUNT;
use crate::settings::SpeedMode;

/// Player intents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    StartRound,
    Reveal(usize),
    AdjustBet(f64),
    /// Starts a session, or asks a running one to stop
    ToggleAutoPlay,
    ToggleSpeed,
}

/// Presentation finished something the engine asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    /// Deal/shuffle animation done
    Entrance,
    /// Flip of this slot done
    Flip(usize),
    /// Result panel has been up for its display window
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Input {
    Intent(Intent),
    Completed(Completion),
}

impl From<Intent> for Input {
    fn from(intent: Intent) -> Self {
        Input::Intent(intent)
    }
}

impl From<Completion> for Input {
    fn from(completion: Completion) -> Self {
        Input::Completed(completion)
    }
}

/// Short status line messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    IdlePrompt,
    InsufficientBalance,
    AutoPlayUnaffordable,
    AutoPlayStarted { rounds: u32 },
    AutoPlayProgress { rounds_left: u32 },
    AutoPlayStopping,
    AutoPlayFinished(StopReason),
    Dealing { auto: bool },
    RevealPrompt { auto: bool },
    Result,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::IdlePrompt => write!(f, "Idle - adjust bet and press Play"),
            Notice::InsufficientBalance => write!(f, "Insufficient balance"),
            Notice::AutoPlayUnaffordable => write!(f, "Insufficient balance for auto-play"),
            Notice::AutoPlayStarted { rounds } => write!(f, "Auto-play: {rounds} rounds (Fast)"),
            Notice::AutoPlayProgress { rounds_left } => {
                write!(f, "Auto-play: {rounds_left} rounds left")
            }
            Notice::AutoPlayStopping => write!(f, "Auto-play: will stop after this round"),
            Notice::AutoPlayFinished(_) => write!(f, "Auto-play finished"),
            Notice::Dealing { auto: true } => write!(f, "Auto-play: dealing..."),
            Notice::Dealing { auto: false } => write!(f, "Preparing cards..."),
            Notice::RevealPrompt { auto: true } => write!(f, "Auto-play: revealing cards"),
            Notice::RevealPrompt { auto: false } => write!(f, "Tap any card to reveal"),
            Notice::Result => write!(f, "Result!"),
        }
    }
}

/// Which controls accept input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub bet_enabled: bool,
    pub play_enabled: bool,
    pub speed_enabled: bool,
}

/// Engine output, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    PhaseChanged { from: RoundPhase, to: RoundPhase },
    BetChanged(f64),
    BalanceChanged(f64),
    SpeedChanged(SpeedMode),
    /// `rounds_remaining` excludes the round being dealt, so a fresh
    /// 10-round session reports 9 alongside its first deal
    AutoPlayChanged { active: bool, rounds_remaining: u32 },
    ControlsChanged(Controls),
    Status(Notice),
    /// Deal the cards face down; answer with `Completion::Entrance`
    EntranceRequested { slots: [f64; CARD_COUNT] },
    /// Turn a card over; answer with `Completion::Flip(slot)`
    FlipRequested { slot: usize, value: f64 },
    /// Show the result panel; answer with `Completion::Result`
    ResultRequested(ResultRecord),
    /// Transient win splash, no answer expected
    WinHighlight { product: f64, payout: f64 },
}

impl EngineEvent {
    /// Whether the presentation owes the engine a completion for this event
    pub fn expects_completion(&self) -> Option<Completion> {
        match self {
            EngineEvent::EntranceRequested { .. } => Some(Completion::Entrance),
            EngineEvent::FlipRequested { slot, .. } => Some(Completion::Flip(*slot)),
            EngineEvent::ResultRequested(_) => Some(Completion::Result),
            _ => None,
        }
    }
}

/// Win splash text
pub fn win_text(product: f64, payout: f64) -> String {
    format!("Win x{product:.2} (+{payout:.2})")
}
