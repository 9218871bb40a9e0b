//! Session statistics
//!
//! Running totals over settled rounds plus a short board of the biggest wins.

use serde::{Deserialize, Serialize};

use crate::engine::ResultRecord;

/// Number of big wins kept on the board
pub const MAX_BIG_WINS: usize = 10;

/// A single notable win
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigWin {
    pub payout: f64,
    pub product: f64,
    pub bet: f64,
    /// 1-based index of the round in the session
    pub round: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds: u64,
    pub wins: u64,
    /// Rounds where every card was dead
    pub all_dead: u64,
    pub total_staked: f64,
    pub total_paid: f64,
    /// Sorted by payout, largest first
    pub big_wins: Vec<BigWin>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ResultRecord) {
        self.rounds += 1;
        self.total_staked += result.bet;
        self.total_paid += result.payout;
        if result.is_win() {
            self.wins += 1;
            self.add_big_win(BigWin {
                payout: result.payout,
                product: result.product,
                bet: result.bet,
                round: self.rounds,
            });
        }
        if result.multipliers.iter().all(|&m| m == 0.0) {
            self.all_dead += 1;
        }
    }

    /// Whether a payout would make the board
    pub fn qualifies(&self, payout: f64) -> bool {
        if payout <= 0.0 {
            return false;
        }
        if self.big_wins.len() < MAX_BIG_WINS {
            return true;
        }
        self.big_wins.last().map(|w| payout > w.payout).unwrap_or(true)
    }

    /// Insert in payout order; returns the 1-based rank or `None`
    fn add_big_win(&mut self, win: BigWin) -> Option<usize> {
        if !self.qualifies(win.payout) {
            return None;
        }
        let pos = self.big_wins.iter().position(|w| win.payout > w.payout);
        let rank = match pos {
            Some(i) => {
                self.big_wins.insert(i, win);
                i + 1
            }
            None => {
                self.big_wins.push(win);
                self.big_wins.len()
            }
        };
        self.big_wins.truncate(MAX_BIG_WINS);
        Some(rank)
    }

    /// Net balance change over the session
    pub fn net(&self) -> f64 {
        self.total_paid - self.total_staked
    }

    /// Observed return to player (paid / staked)
    pub fn rtp(&self) -> Option<f64> {
        (self.total_staked > 0.0).then(|| self.total_paid / self.total_staked)
    }

    pub fn biggest_win(&self) -> Option<&BigWin> {
        self.big_wins.first()
    }
}
