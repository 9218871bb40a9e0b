//! Weighted catalogue of card multipliers
//!
//! Loaded once at startup and never mutated. Weights are relative and need
//! not sum to anything in particular.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::RARE_THRESHOLD;

/// Bundled default table
const DEFAULT_TABLE_JSON: &str = include_str!("../../assets/multipliers.json");

/// One possible card value and its relative weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierEntry {
    /// Factor applied to the bet (0 is a dead card)
    pub value: f64,
    /// Relative weight
    pub chance: f64,
}

/// Table rejected at load time
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("multiplier table is empty")]
    Empty,
    #[error("entry {index}: value must be finite and non-negative (got {value})")]
    InvalidValue { index: usize, value: f64 },
    #[error("entry {index}: chance must be finite and non-negative (got {chance})")]
    InvalidChance { index: usize, chance: f64 },
    #[error("multiplier table has no positive weight")]
    NoWeight,
    #[error("invalid multiplier table json: {0}")]
    Json(String),
}

/// Visual grouping of a multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    /// 0x
    Dead,
    /// Small hits
    Common,
    /// `RARE_THRESHOLD` and above
    Rare,
}

impl Rarity {
    pub fn of(value: f64) -> Self {
        if value == 0.0 {
            Rarity::Dead
        } else if value >= RARE_THRESHOLD {
            Rarity::Rare
        } else {
            Rarity::Common
        }
    }

    /// Card face colour (RGB)
    pub fn color(&self) -> u32 {
        match self {
            Rarity::Dead => 0x9e9e9e,
            Rarity::Rare => 0xffd54f,
            Rarity::Common => 0x90caf9,
        }
    }
}

/// A row of the pay table overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayTableRow {
    pub value: f64,
    pub rarity: Rarity,
    /// Probability of this value on a single card, in percent
    pub percent: f64,
}

/// Ordered, validated, non-empty multiplier table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiplierTable {
    entries: Vec<MultiplierEntry>,
    total_weight: f64,
}

impl MultiplierTable {
    /// Validate entries. Order is preserved; it decides the selector's fallback.
    pub fn new(entries: Vec<MultiplierEntry>) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        for (index, entry) in entries.iter().enumerate() {
            if !entry.value.is_finite() || entry.value < 0.0 {
                return Err(TableError::InvalidValue {
                    index,
                    value: entry.value,
                });
            }
            if !entry.chance.is_finite() || entry.chance < 0.0 {
                return Err(TableError::InvalidChance {
                    index,
                    chance: entry.chance,
                });
            }
        }
        let total_weight: f64 = entries.iter().map(|e| e.chance).sum();
        if !(total_weight > 0.0) || !total_weight.is_finite() {
            return Err(TableError::NoWeight);
        }
        Ok(Self {
            entries,
            total_weight,
        })
    }

    /// Parse a `[{ "value": .., "chance": .. }, ..]` document
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let entries: Vec<MultiplierEntry> =
            serde_json::from_str(json).map_err(|e| TableError::Json(e.to_string()))?;
        Self::new(entries)
    }

    /// The table bundled with the crate
    pub fn bundled() -> Result<Self, TableError> {
        Self::from_json(DEFAULT_TABLE_JSON)
    }

    pub fn entries(&self) -> &[MultiplierEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; an empty table never validates
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `value` is one of the table's values
    pub fn contains_value(&self, value: f64) -> bool {
        self.entries.iter().any(|e| e.value == value)
    }

    /// Rows for the pay table overlay, in table order
    pub fn pay_table(&self) -> Vec<PayTableRow> {
        self.entries
            .iter()
            .map(|e| PayTableRow {
                value: e.value,
                rarity: Rarity::of(e.value),
                percent: e.chance / self.total_weight * 100.0,
            })
            .collect()
    }

    /// Expected value of a single card
    pub fn mean_value(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.value * e.chance)
            .sum::<f64>()
            / self.total_weight
    }
}
