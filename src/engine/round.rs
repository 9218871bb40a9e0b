//! A single round: dealt cards, reveal progress, settlement math

use serde::{Deserialize, Serialize};

use crate::consts::CARD_COUNT;

/// Where the round state machine is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// Between rounds; bet and play controls live
    #[default]
    Idle,
    /// Stake taken, cards being dealt
    RoundStart,
    /// Cards on the table, waiting for reveals
    Reveal,
    /// Settled, result on screen
    Result,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "Idle",
            RoundPhase::RoundStart => "RoundStart",
            RoundPhase::Reveal => "Reveal",
            RoundPhase::Result => "Result",
        }
    }
}

/// Outcome of a settled round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub bet: f64,
    /// Every revealed value, in reveal order (dead cards included)
    pub multipliers: Vec<f64>,
    /// Product of the positive values, 0 when there are none
    pub product: f64,
    pub payout: f64,
}

impl ResultRecord {
    pub fn settle(bet: f64, revealed: &[f64]) -> Self {
        let product = positive_product(revealed);
        Self {
            bet,
            multipliers: revealed.to_vec(),
            product,
            payout: product * bet,
        }
    }

    pub fn is_win(&self) -> bool {
        self.payout > 0.0
    }

    /// Balance change including the stake
    pub fn net(&self) -> f64 {
        self.payout - self.bet
    }

    /// Text for the result panel
    pub fn summary(&self) -> String {
        let mults = self
            .multipliers
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" × ");
        format!(
            "Bet: {:.2}\nMultipliers: {}\nProduct: {}\nPayout: {:.2}",
            self.bet, mults, self.product, self.payout
        )
    }
}

/// Product of the values above zero; 0 if every value is a dead card
pub fn positive_product(values: &[f64]) -> f64 {
    let mut positive = values.iter().copied().filter(|&v| v > 0.0).peekable();
    if positive.peek().is_none() {
        return 0.0;
    }
    positive.product()
}

/// Cards on the table for the current round
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Round {
    /// Slot -> multiplier
    assigned: [f64; CARD_COUNT],
    /// Slots in the order they were revealed
    reveal_order: Vec<usize>,
    /// Values in reveal order
    revealed_values: Vec<f64>,
}

impl Round {
    pub fn new(assigned: [f64; CARD_COUNT]) -> Self {
        Self {
            assigned,
            reveal_order: Vec::with_capacity(CARD_COUNT),
            revealed_values: Vec::with_capacity(CARD_COUNT),
        }
    }

    pub fn assigned(&self) -> &[f64; CARD_COUNT] {
        &self.assigned
    }

    pub fn reveal_order(&self) -> &[usize] {
        &self.reveal_order
    }

    pub fn revealed_values(&self) -> &[f64] {
        &self.revealed_values
    }

    pub fn is_revealed(&self, slot: usize) -> bool {
        self.reveal_order.contains(&slot)
    }

    /// Turn over `slot`. `None` if the slot doesn't exist or is already face up.
    pub fn reveal(&mut self, slot: usize) -> Option<f64> {
        if slot >= CARD_COUNT || self.is_revealed(slot) {
            return None;
        }
        let value = self.assigned[slot];
        self.reveal_order.push(slot);
        self.revealed_values.push(value);
        Some(value)
    }

    /// First face-down slot, left to right
    pub fn next_hidden(&self) -> Option<usize> {
        (0..CARD_COUNT).find(|&slot| !self.is_revealed(slot))
    }

    pub fn all_revealed(&self) -> bool {
        self.reveal_order.len() == CARD_COUNT
    }

    /// The slot that completed the round, once every card is up
    pub fn final_slot(&self) -> Option<usize> {
        if self.all_revealed() {
            self.reveal_order.last().copied()
        } else {
            None
        }
    }
}
