//! Weighted multiplier draws and card dealing
//!
//! Pure functions of the table and a seeded RNG; no side effects beyond
//! advancing the RNG.

use std::fmt::Debug;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::table::MultiplierTable;
use crate::consts::CARD_COUNT;

/// Seed record so a run can be reproduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Draws multipliers with probability proportional to their weight
#[derive(Debug, Clone)]
pub struct WeightedSelector {
    table: MultiplierTable,
}

impl WeightedSelector {
    pub fn new(table: MultiplierTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MultiplierTable {
        &self.table
    }

    /// Index of the entry a roll in `[0, total_weight)` lands on.
    ///
    /// Walks cumulative weights in table order and takes the first entry whose
    /// running sum reaches the roll. Zero-weight entries are never chosen. If
    /// rounding leaves the roll above the final sum, the last weighted entry wins.
    pub fn index_for_roll(&self, roll: f64) -> usize {
        let entries = self.table.entries();
        let mut acc = 0.0;
        let mut last_weighted = entries.len() - 1;
        for (i, entry) in entries.iter().enumerate() {
            if entry.chance <= 0.0 {
                continue;
            }
            last_weighted = i;
            acc += entry.chance;
            if acc >= roll {
                return i;
            }
        }
        last_weighted
    }

    /// Draw one multiplier value
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let roll = rng.random::<f64>() * self.table.total_weight();
        self.table.entries()[self.index_for_roll(roll)].value
    }

    /// Draw one value per card, then spread them uniformly over the slots
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; CARD_COUNT] {
        let mut slots = [0.0; CARD_COUNT];
        for slot in slots.iter_mut() {
            *slot = self.draw(rng);
        }
        // Fisher-Yates
        slots.shuffle(rng);
        slots
    }
}

/// Source of the three cards for a round
pub trait Dealer: Debug {
    fn deal(&mut self) -> [f64; CARD_COUNT];
}

/// Deals from a weighted selector driven by a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededDealer {
    selector: WeightedSelector,
    rng_state: RngState,
    rng: Pcg32,
}

impl SeededDealer {
    pub fn new(table: MultiplierTable, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            selector: WeightedSelector::new(table),
            rng: rng_state.to_rng(),
            rng_state,
        }
    }

    pub fn rng_state(&self) -> RngState {
        self.rng_state
    }

    pub fn selector(&self) -> &WeightedSelector {
        &self.selector
    }
}

impl Dealer for SeededDealer {
    fn deal(&mut self) -> [f64; CARD_COUNT] {
        self.selector.deal(&mut self.rng)
    }
}
