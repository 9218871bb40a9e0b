//! Engine configuration and presentation speed
//!
//! The engine constants can be overridden from JSON; anything missing falls
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Presentation speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedMode {
    #[default]
    Normal,
    Fast,
}

impl SpeedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedMode::Normal => "Normal",
            SpeedMode::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(SpeedMode::Normal),
            "fast" => Some(SpeedMode::Fast),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SpeedMode::Normal => SpeedMode::Fast,
            SpeedMode::Fast => SpeedMode::Normal,
        }
    }

    /// Card flip duration hint (seconds)
    pub fn flip_duration(&self) -> f32 {
        match self {
            SpeedMode::Normal => 0.15,
            SpeedMode::Fast => 0.08,
        }
    }

    /// Deal/shuffle duration hint (seconds)
    pub fn shuffle_duration(&self) -> f32 {
        match self {
            SpeedMode::Normal => 0.15,
            SpeedMode::Fast => 0.08,
        }
    }

    /// How long the result panel stays up before the round closes (seconds).
    /// Not speed dependent.
    pub fn result_display(&self) -> f32 {
        1.5
    }

    /// Label shown on the speed toggle
    pub fn label(&self) -> String {
        format!("Speed: {}", self.as_str())
    }
}

/// Configuration rejected by [`EngineConfig::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("min bet must be positive (got {0})")]
    NonPositiveMinBet(f64),
    #[error("min bet {min} exceeds max bet {max}")]
    InvertedBetBounds { min: f64, max: f64 },
    #[error("default bet {bet} outside [{min}, {max}]")]
    DefaultBetOutOfBounds { bet: f64, min: f64, max: f64 },
    #[error("default balance must be non-negative (got {0})")]
    NegativeBalance(f64),
    #[error("bet step must be positive (got {0})")]
    NonPositiveStep(f64),
    #[error("auto-play needs at least one round")]
    NoAutoPlayRounds,
    #[error("invalid config json: {0}")]
    Json(String),
}

/// Engine constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_bet: f64,
    pub max_bet: f64,
    /// Bet used when nothing usable was persisted
    pub default_bet: f64,
    /// Balance used when nothing usable was persisted
    pub default_balance: f64,
    /// Increment the bet +/- controls apply
    pub bet_step: f64,
    /// Rounds per auto-play session
    pub auto_play_rounds: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_bet: MIN_BET,
            max_bet: MAX_BET,
            default_bet: DEFAULT_BET,
            default_balance: DEFAULT_BALANCE,
            bet_step: BET_STEP,
            auto_play_rounds: AUTO_PLAY_ROUNDS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_bet > 0.0) {
            return Err(ConfigError::NonPositiveMinBet(self.min_bet));
        }
        if !(self.min_bet <= self.max_bet) {
            return Err(ConfigError::InvertedBetBounds {
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        if !(self.min_bet..=self.max_bet).contains(&self.default_bet) {
            return Err(ConfigError::DefaultBetOutOfBounds {
                bet: self.default_bet,
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        if !(self.default_balance >= 0.0) {
            return Err(ConfigError::NegativeBalance(self.default_balance));
        }
        if !(self.bet_step > 0.0) {
            return Err(ConfigError::NonPositiveStep(self.bet_step));
        }
        if self.auto_play_rounds == 0 {
            return Err(ConfigError::NoAutoPlayRounds);
        }
        Ok(())
    }

    /// Clamp a bet into the configured bounds
    pub fn clamp_bet(&self, bet: f64) -> f64 {
        bet.clamp(self.min_bet, self.max_bet)
    }
}
