//! Bet and balance bookkeeping
//!
//! The stake leaves the balance when a round starts and only settlement can
//! put value back, so the balance never goes negative. Every mutation is
//! written through to the store; write failures are logged and ignored.

use thiserror::Error;

use crate::persistence::{PersistedState, Store, load_or_none};
use crate::settings::EngineConfig;

/// Why a bet change was refused
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum BetRejection {
    #[error("bet can only change between rounds")]
    RoundInProgress,
    #[error("bet is locked during auto-play")]
    AutoPlayActive,
    #[error("bet change {0} is not a finite amount")]
    InvalidDelta(f64),
    #[error("bet {0:.2} below minimum")]
    BelowMin(f64),
    #[error("bet {0:.2} above maximum")]
    AboveMax(f64),
    #[error("bet {bet:.2} exceeds balance {balance:.2}")]
    Unaffordable { bet: f64, balance: f64 },
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum EconomyError {
    #[error("insufficient balance: bet {bet:.2}, balance {balance:.2}")]
    InsufficientBalance { bet: f64, balance: f64 },
}

#[derive(Debug)]
pub struct Economy {
    bet: f64,
    balance: f64,
    min_bet: f64,
    max_bet: f64,
    store: Box<dyn Store>,
}

impl Economy {
    /// Restore from the store, falling back to the configured defaults.
    /// A restored bet outside the bounds is clamped into them.
    pub fn new(config: &EngineConfig, store: Box<dyn Store>) -> Self {
        let (bet, balance) = match load_or_none(store.as_ref()) {
            Some(saved) => (config.clamp_bet(saved.bet), saved.balance),
            None => (config.default_bet, config.default_balance),
        };
        Self {
            bet,
            balance,
            min_bet: config.min_bet,
            max_bet: config.max_bet,
            store,
        }
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn min_bet(&self) -> f64 {
        self.min_bet
    }

    pub fn max_bet(&self) -> f64 {
        self.max_bet
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            bet: self.bet,
            balance: self.balance,
        }
    }

    /// Move the bet by `delta`, snapped to cents. Only checks bounds and
    /// cover; whether the round state allows a change is the caller's concern.
    pub fn adjust_bet(&mut self, delta: f64) -> Result<f64, BetRejection> {
        if !delta.is_finite() {
            return Err(BetRejection::InvalidDelta(delta));
        }
        let next = ((self.bet + delta) * 100.0).round() / 100.0;
        if !(self.min_bet..=self.max_bet).contains(&next) {
            return Err(if next < self.min_bet {
                BetRejection::BelowMin(next)
            } else {
                BetRejection::AboveMax(next)
            });
        }
        if next > self.balance {
            return Err(BetRejection::Unaffordable {
                bet: next,
                balance: self.balance,
            });
        }
        self.bet = next;
        self.persist();
        Ok(next)
    }

    pub fn can_start_round(&self) -> bool {
        self.bet <= self.balance
    }

    /// Take the stake for a new round
    pub fn commit_stake(&mut self) -> Result<f64, EconomyError> {
        if !self.can_start_round() {
            return Err(EconomyError::InsufficientBalance {
                bet: self.bet,
                balance: self.balance,
            });
        }
        self.balance -= self.bet;
        self.persist();
        Ok(self.bet)
    }

    /// Credit a settled round. Zero is a valid payout.
    pub fn apply_payout(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "payout must be non-negative");
        self.balance += amount.max(0.0);
        self.persist();
    }

    fn persist(&mut self) {
        let state = self.snapshot();
        if let Err(e) = self.store.save(&state) {
            log::warn!("Failed to save state: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn economy_with(store: &MemoryStore) -> Economy {
        Economy::new(&EngineConfig::default(), Box::new(store.clone()))
    }

    #[test]
    fn test_defaults_without_saved_state() {
        let store = MemoryStore::new();
        let eco = economy_with(&store);
        assert_eq!(eco.bet(), 1.0);
        assert_eq!(eco.balance(), 100.0);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_restores_and_clamps_saved_state() {
        let store = MemoryStore::with_state(PersistedState {
            bet: 3.0,
            balance: 55.0,
        });
        let eco = economy_with(&store);
        assert_eq!((eco.bet(), eco.balance()), (3.0, 55.0));

        let store = MemoryStore::with_state(PersistedState {
            bet: 40.0,
            balance: 55.0,
        });
        assert_eq!(economy_with(&store).bet(), 10.0);
    }

    #[test]
    fn test_malformed_saved_state_uses_defaults() {
        let store = MemoryStore::with_raw(r#"{"bet": "lots", "balance": null}"#);
        let eco = economy_with(&store);
        assert_eq!((eco.bet(), eco.balance()), (1.0, 100.0));
    }

    #[test]
    fn test_adjust_bet_bounds() {
        let store = MemoryStore::with_state(PersistedState {
            bet: 10.0,
            balance: 100.0,
        });
        let mut eco = economy_with(&store);
        assert_eq!(eco.adjust_bet(1.0), Err(BetRejection::AboveMax(11.0)));
        assert_eq!(eco.bet(), 10.0);
        assert_eq!(eco.adjust_bet(-1.0), Ok(9.0));
        assert_eq!(store.stored().map(|s| s.bet), Some(9.0));

        let mut eco = economy_with(&MemoryStore::new());
        assert_eq!(eco.adjust_bet(-1.0), Err(BetRejection::BelowMin(0.0)));
        assert_eq!(eco.bet(), 1.0);
    }

    #[test]
    fn test_non_finite_delta_is_refused() {
        let store = MemoryStore::with_state(PersistedState {
            bet: 4.0,
            balance: 60.0,
        });
        let mut eco = economy_with(&store);
        for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                eco.adjust_bet(delta),
                Err(BetRejection::InvalidDelta(_))
            ));
            assert_eq!(eco.bet(), 4.0);
        }
        assert_eq!(store.writes(), 0);
        // The saved record still loads
        assert_eq!(economy_with(&store).balance(), 60.0);
    }

    #[test]
    fn test_fractional_steps_reach_bounds() {
        let mut eco = economy_with(&MemoryStore::new());
        for _ in 0..90 {
            eco.adjust_bet(0.1).unwrap();
        }
        assert_eq!(eco.bet(), 10.0);
        assert_eq!(eco.adjust_bet(0.1), Err(BetRejection::AboveMax(10.1)));
        for _ in 0..90 {
            eco.adjust_bet(-0.1).unwrap();
        }
        assert_eq!(eco.bet(), 1.0);
    }

    #[test]
    fn test_adjust_bet_respects_balance() {
        let store = MemoryStore::with_state(PersistedState {
            bet: 2.0,
            balance: 2.5,
        });
        let mut eco = economy_with(&store);
        assert!(matches!(
            eco.adjust_bet(1.0),
            Err(BetRejection::Unaffordable { .. })
        ));
        assert_eq!(eco.bet(), 2.0);
    }

    #[test]
    fn test_stake_and_payout() {
        let store = MemoryStore::new();
        let mut eco = economy_with(&store);
        eco.adjust_bet(1.0).unwrap();
        assert_eq!(eco.commit_stake(), Ok(2.0));
        assert_eq!(eco.balance(), 98.0);
        eco.apply_payout(20.0);
        assert_eq!(eco.balance(), 118.0);
        assert_eq!(
            store.stored(),
            Some(PersistedState {
                bet: 2.0,
                balance: 118.0
            })
        );
        assert_eq!(store.writes(), 3);
    }

    #[test]
    fn test_commit_without_cover_is_refused() {
        let store = MemoryStore::with_state(PersistedState {
            bet: 5.0,
            balance: 4.0,
        });
        let mut eco = economy_with(&store);
        assert!(!eco.can_start_round());
        assert!(eco.commit_stake().is_err());
        assert_eq!(eco.balance(), 4.0);
    }

    #[test]
    fn test_failed_writes_do_not_affect_memory_state() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let mut eco = economy_with(&store);
        eco.commit_stake().unwrap();
        eco.apply_payout(0.0);
        assert_eq!(eco.balance(), 99.0);
        assert_eq!(store.writes(), 0);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(ops in prop::collection::vec((0u8..5, 0.0f64..30.0), 0..200)) {
            let mut eco = economy_with(&MemoryStore::new());
            let odd_deltas = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.37, -2.5];
            for (op, amount) in ops {
                match op {
                    0 => { let _ = eco.adjust_bet(1.0); }
                    1 => { let _ = eco.adjust_bet(-1.0); }
                    2 => { let _ = eco.commit_stake(); }
                    3 => { let _ = eco.adjust_bet(odd_deltas[amount as usize % odd_deltas.len()]); }
                    _ => eco.apply_payout(amount),
                }
                prop_assert!(eco.bet() >= eco.min_bet() && eco.bet() <= eco.max_bet());
                prop_assert!(eco.balance() >= 0.0);
            }
        }
    }
}
