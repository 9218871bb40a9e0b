//! Tarot Draw - a three-card multiplier wagering game
//!
//! Core modules:
//! - `engine`: Deterministic round engine (multiplier table, selector, economy, state machine)
//! - `persistence`: Best-effort save/load of bet and balance
//! - `settings`: Engine configuration and speed mode
//! - `headless`: Presentation stand-in that acknowledges every request immediately
//! - `stats`: Session statistics for simulated play

pub mod engine;
pub mod headless;
pub mod persistence;
pub mod settings;
pub mod stats;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{
    Completion, Engine, EngineEvent, Input, Intent, MultiplierEntry, MultiplierTable, Notice,
    ResultRecord, RoundPhase,
};
pub use settings::{EngineConfig, SpeedMode};

/// Game configuration constants
pub mod consts {
    /// Number of face-down cards dealt per round
    pub const CARD_COUNT: usize = 3;

    /// Bet bounds
    pub const MIN_BET: f64 = 1.0;
    pub const MAX_BET: f64 = 10.0;
    /// Amount a single bet +/- press moves the bet
    pub const BET_STEP: f64 = 1.0;

    /// Fallbacks when no persisted record is available
    pub const DEFAULT_BET: f64 = 1.0;
    pub const DEFAULT_BALANCE: f64 = 100.0;

    /// Rounds chained by a single auto-play session
    pub const AUTO_PLAY_ROUNDS: u32 = 10;

    /// Multipliers at or above this are shown as rare
    pub const RARE_THRESHOLD: f64 = 3.0;

    /// Key used for the persisted {bet, balance} record
    pub const STORAGE_KEY: &str = "tarot_state";
}

/// Format a money amount with two decimals
#[inline]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Format a multiplier for a card face (`x2`, `x0.3`)
#[inline]
pub fn format_multiplier(value: f64) -> String {
    format!("x{value}")
}
