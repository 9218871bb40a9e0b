//! Round state machine
//!
//! `Idle -> RoundStart -> Reveal -> Result -> Idle`, with auto-play as a
//! sub-mode layered over the same four phases. Every input runs to
//! completion before the next one is accepted (`dispatch` takes `&mut self`),
//! and inputs that don't fit the current phase are dropped, not queued.

use thiserror::Error;

use super::autoplay::{AutoPlayDecision, AutoPlaySession, StopReason};
use super::economy::{BetRejection, Economy};
use super::events::{Completion, Controls, EngineEvent, Input, Intent, Notice};
use super::round::{ResultRecord, Round, RoundPhase};
use super::selector::{Dealer, SeededDealer};
use super::table::{MultiplierTable, TableError};
use crate::consts::CARD_COUNT;
use crate::persistence::Store;
use crate::settings::{ConfigError, EngineConfig, SpeedMode};

/// Fatal configuration faults found while building an engine
#[derive(Debug, Error, PartialEq)]
pub enum StartupError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The round engine
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    dealer: Box<dyn Dealer>,
    economy: Economy,
    phase: RoundPhase,
    /// Cards of the round in flight
    round: Option<Round>,
    /// Bet taken for the round in flight
    stake: f64,
    /// Slots whose flip the presentation hasn't acknowledged yet
    flips_in_flight: [bool; CARD_COUNT],
    speed: SpeedMode,
    auto_play: Option<AutoPlaySession>,
    last_result: Option<ResultRecord>,
    rounds_played: u64,
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Build an engine around any dealer. The persisted bet/balance are
    /// loaded from `store` here.
    pub fn new(
        config: EngineConfig,
        dealer: Box<dyn Dealer>,
        store: Box<dyn Store>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let economy = Economy::new(&config, store);
        let mut engine = Self {
            config,
            dealer,
            economy,
            phase: RoundPhase::Idle,
            round: None,
            stake: 0.0,
            flips_in_flight: [false; CARD_COUNT],
            speed: SpeedMode::Normal,
            auto_play: None,
            last_result: None,
            rounds_played: 0,
            events: Vec::new(),
        };
        engine.emit_snapshot();
        Ok(engine)
    }

    /// Engine dealing from `table` with a PCG stream seeded by `seed`
    pub fn seeded(
        config: EngineConfig,
        table: MultiplierTable,
        store: Box<dyn Store>,
        seed: u64,
    ) -> Result<Self, StartupError> {
        let dealer = SeededDealer::new(table, seed);
        Ok(Self::new(config, Box::new(dealer), store)?)
    }

    /// Default config and the bundled multiplier table
    pub fn with_defaults(store: Box<dyn Store>, seed: u64) -> Result<Self, StartupError> {
        Self::seeded(EngineConfig::default(), MultiplierTable::bundled()?, store, seed)
    }

    // ---------- Accessors ----------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn bet(&self) -> f64 {
        self.economy.bet()
    }

    pub fn balance(&self) -> f64 {
        self.economy.balance()
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn speed(&self) -> SpeedMode {
        self.speed
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn auto_play(&self) -> Option<&AutoPlaySession> {
        self.auto_play.as_ref()
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play.is_some()
    }

    pub fn last_result(&self) -> Option<&ResultRecord> {
        self.last_result.as_ref()
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn controls(&self) -> Controls {
        let auto = self.is_auto_playing();
        let idle = self.phase == RoundPhase::Idle;
        Controls {
            bet_enabled: idle && !auto,
            play_enabled: idle && !auto,
            speed_enabled: !auto,
        }
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------- Input ----------

    /// Process one intent or completion
    pub fn dispatch(&mut self, input: impl Into<Input>) {
        match input.into() {
            Input::Intent(Intent::StartRound) => self.on_start_intent(),
            Input::Intent(Intent::Reveal(slot)) => self.on_reveal_intent(slot),
            Input::Intent(Intent::AdjustBet(delta)) => {
                if let Err(e) = self.adjust_bet(delta) {
                    log::debug!("Bet change ignored: {e}");
                }
            }
            Input::Intent(Intent::ToggleAutoPlay) => {
                if self.is_auto_playing() {
                    self.request_stop();
                } else {
                    self.start_auto_play();
                }
            }
            Input::Intent(Intent::ToggleSpeed) => self.toggle_speed(),
            Input::Completed(Completion::Entrance) => self.on_entrance_done(),
            Input::Completed(Completion::Flip(slot)) => self.on_flip_done(slot),
            Input::Completed(Completion::Result) => self.on_result_done(),
        }
    }

    /// Change the bet between manual rounds
    pub fn adjust_bet(&mut self, delta: f64) -> Result<f64, BetRejection> {
        if self.phase != RoundPhase::Idle {
            return Err(BetRejection::RoundInProgress);
        }
        if self.is_auto_playing() {
            return Err(BetRejection::AutoPlayActive);
        }
        let bet = self.economy.adjust_bet(delta)?;
        self.events.push(EngineEvent::BetChanged(bet));
        Ok(bet)
    }

    /// Begin a manual round. Returns whether a round was dealt.
    pub fn start_round(&mut self) -> bool {
        if self.phase != RoundPhase::Idle {
            log::debug!("Start ignored in {}", self.phase.as_str());
            return false;
        }
        if !self.economy.can_start_round() {
            self.events.push(EngineEvent::Status(Notice::InsufficientBalance));
            return false;
        }
        self.deal_round()
    }

    /// Start an auto-play session. Returns whether it started.
    pub fn start_auto_play(&mut self) -> bool {
        if self.is_auto_playing() || self.phase != RoundPhase::Idle {
            return false;
        }
        if !self.economy.can_start_round() {
            self.events.push(EngineEvent::Status(Notice::AutoPlayUnaffordable));
            return false;
        }

        self.begin_auto_play()
    }

    /// Ask a running session to stop at the next round boundary
    pub fn request_stop(&mut self) {
        if let Some(session) = self.auto_play.as_mut() {
            session.request_stop();
            self.events.push(EngineEvent::Status(Notice::AutoPlayStopping));
        }
    }

    pub fn toggle_speed(&mut self) {
        if self.is_auto_playing() {
            return;
        }
        self.set_speed(self.speed.toggled());
    }

    // ---------- Transitions ----------

    /// Take the stake, deal, and ask for the entrance animation. Callers have
    /// already checked the phase and that the bet is covered.
    fn deal_round(&mut self) -> bool {
        let stake = match self.economy.commit_stake() {
            Ok(stake) => stake,
            Err(e) => {
                log::warn!("Round not started: {e}");
                self.events.push(EngineEvent::Status(Notice::InsufficientBalance));
                return false;
            }
        };
        self.events
            .push(EngineEvent::BalanceChanged(self.economy.balance()));

        if let Some(session) = self.auto_play.as_mut() {
            session.begin_round();
            let rounds_remaining = session.rounds_remaining;
            self.events.push(EngineEvent::AutoPlayChanged {
                active: true,
                rounds_remaining,
            });
        }

        let slots = self.dealer.deal();
        log::info!("Round dealt: stake {stake:.2}, cards {slots:?}");
        self.stake = stake;
        self.round = Some(Round::new(slots));
        self.flips_in_flight = [false; CARD_COUNT];

        self.set_phase(RoundPhase::RoundStart);
        self.events.push(EngineEvent::EntranceRequested { slots });
        true
    }

    /// Open a session and deal its first round. A session whose first deal
    /// fails is closed again right away.
    fn begin_auto_play(&mut self) -> bool {
        let session = AutoPlaySession::new(self.config.auto_play_rounds, self.speed);
        let rounds = session.rounds_target;
        self.auto_play = Some(session);
        self.set_speed(SpeedMode::Fast);
        log::info!("Auto-play started ({rounds} rounds)");
        self.events
            .push(EngineEvent::Status(Notice::AutoPlayStarted { rounds }));
        if !self.deal_round() {
            self.finish_auto_play(StopReason::Unaffordable);
            return false;
        }
        true
    }

    fn on_start_intent(&mut self) {
        if self.is_auto_playing() {
            log::debug!("Start ignored during auto-play");
            return;
        }
        self.start_round();
    }

    fn on_entrance_done(&mut self) {
        if self.phase != RoundPhase::RoundStart {
            log::debug!("Stray entrance completion in {}", self.phase.as_str());
            return;
        }
        self.set_phase(RoundPhase::Reveal);
        if self.is_auto_playing() {
            self.auto_reveal_next();
        }
    }

    fn on_reveal_intent(&mut self, slot: usize) {
        if self.is_auto_playing() || self.phase != RoundPhase::Reveal {
            log::debug!("Reveal {slot} ignored in {}", self.phase.as_str());
            return;
        }
        self.reveal(slot);
    }

    /// Turn over a face-down card and ask for its flip
    fn reveal(&mut self, slot: usize) -> bool {
        let Some(value) = self.round.as_mut().and_then(|round| round.reveal(slot)) else {
            return false;
        };
        self.flips_in_flight[slot] = true;
        self.events.push(EngineEvent::FlipRequested { slot, value });
        true
    }

    /// Auto-play reveals left to right, one flip at a time
    fn auto_reveal_next(&mut self) {
        match self.round.as_ref().and_then(Round::next_hidden) {
            Some(slot) => {
                self.reveal(slot);
            }
            None => self.settle(),
        }
    }

    fn on_flip_done(&mut self, slot: usize) {
        if self.phase != RoundPhase::Reveal || slot >= CARD_COUNT || !self.flips_in_flight[slot] {
            log::debug!("Stray flip completion for slot {slot}");
            return;
        }
        self.flips_in_flight[slot] = false;

        let final_slot = self.round.as_ref().and_then(Round::final_slot);
        if final_slot == Some(slot) {
            self.settle();
        } else if self.is_auto_playing() {
            self.auto_reveal_next();
        }
    }

    /// Pay out the round and put the result on screen
    fn settle(&mut self) {
        let Some(round) = self.round.take() else {
            return;
        };
        let record = ResultRecord::settle(self.stake, round.revealed_values());
        self.economy.apply_payout(record.payout);
        self.rounds_played += 1;
        log::info!(
            "Round settled: {:?} product {} payout {:.2} balance {:.2}",
            record.multipliers,
            record.product,
            record.payout,
            self.economy.balance()
        );

        self.events
            .push(EngineEvent::BalanceChanged(self.economy.balance()));
        self.set_phase(RoundPhase::Result);
        self.events
            .push(EngineEvent::ResultRequested(record.clone()));
        if record.is_win() {
            self.events.push(EngineEvent::WinHighlight {
                product: record.product,
                payout: record.payout,
            });
        }
        self.last_result = Some(record);
    }

    /// Result window over: back to Idle, or straight into the next auto round
    fn on_result_done(&mut self) {
        if self.phase != RoundPhase::Result {
            log::debug!("Stray result completion in {}", self.phase.as_str());
            return;
        }

        let decision = self
            .auto_play
            .as_ref()
            .map(|session| session.on_round_complete(self.economy.can_start_round()));

        match decision {
            Some(AutoPlayDecision::Continue) => {
                let rounds_left = self
                    .auto_play
                    .as_ref()
                    .map_or(0, |session| session.rounds_remaining);
                self.events
                    .push(EngineEvent::Status(Notice::AutoPlayProgress { rounds_left }));
                if !self.deal_round() {
                    self.finish_auto_play(StopReason::Unaffordable);
                }
            }
            Some(AutoPlayDecision::Stop(reason)) => self.finish_auto_play(reason),
            None => self.set_phase(RoundPhase::Idle),
        }
    }

    fn finish_auto_play(&mut self, reason: StopReason) {
        let Some(session) = self.auto_play.take() else {
            return;
        };
        log::info!(
            "Auto-play finished after {} rounds ({reason:?})",
            session.rounds_played()
        );
        self.set_speed(session.speed_before);
        self.events.push(EngineEvent::AutoPlayChanged {
            active: false,
            rounds_remaining: 0,
        });
        self.set_phase(RoundPhase::Idle);
        self.events
            .push(EngineEvent::Status(Notice::AutoPlayFinished(reason)));
    }

    // ---------- State management ----------

    fn set_phase(&mut self, next: RoundPhase) {
        log::debug!("State: {} -> {}", self.phase.as_str(), next.as_str());
        let from = self.phase;
        self.phase = next;
        self.events.push(EngineEvent::PhaseChanged { from, to: next });
        self.events.push(EngineEvent::ControlsChanged(self.controls()));

        let auto = self.is_auto_playing();
        let notice = match next {
            RoundPhase::Idle if auto => None,
            RoundPhase::Idle => Some(Notice::IdlePrompt),
            RoundPhase::RoundStart => Some(Notice::Dealing { auto }),
            RoundPhase::Reveal => Some(Notice::RevealPrompt { auto }),
            RoundPhase::Result => Some(Notice::Result),
        };
        if let Some(notice) = notice {
            self.events.push(EngineEvent::Status(notice));
        }
    }

    fn set_speed(&mut self, speed: SpeedMode) {
        if self.speed != speed {
            self.speed = speed;
            self.events.push(EngineEvent::SpeedChanged(speed));
        }
    }

    /// Everything a freshly attached presentation needs to draw the table
    fn emit_snapshot(&mut self) {
        self.events.push(EngineEvent::BetChanged(self.economy.bet()));
        self.events
            .push(EngineEvent::BalanceChanged(self.economy.balance()));
        self.events.push(EngineEvent::SpeedChanged(self.speed));
        self.events.push(EngineEvent::AutoPlayChanged {
            active: false,
            rounds_remaining: 0,
        });
        self.events.push(EngineEvent::ControlsChanged(self.controls()));
        self.events.push(EngineEvent::Status(Notice::IdlePrompt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::table::MultiplierEntry;
    use crate::headless::ScriptedDealer;
    use crate::persistence::{MemoryStore, PersistedState};

    fn engine(hands: Vec<[f64; CARD_COUNT]>, bet: f64, balance: f64) -> Engine {
        let store = MemoryStore::with_state(PersistedState { bet, balance });
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(ScriptedDealer::new(hands)),
            Box::new(store),
        )
        .unwrap();
        engine.drain_events();
        engine
    }

    fn phases(events: &[EngineEvent]) -> Vec<RoundPhase> {
        events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::PhaseChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_snapshot() {
        let store = MemoryStore::new();
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(ScriptedDealer::new([])),
            Box::new(store),
        )
        .unwrap();
        let events = engine.drain_events();
        assert!(events.contains(&EngineEvent::BetChanged(1.0)));
        assert!(events.contains(&EngineEvent::BalanceChanged(100.0)));
        assert!(events.contains(&EngineEvent::Status(Notice::IdlePrompt)));
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_manual_round_walkthrough() {
        let mut engine = engine(vec![[0.0, 2.0, 5.0]], 2.0, 100.0);

        engine.dispatch(Intent::StartRound);
        assert_eq!(engine.phase(), RoundPhase::RoundStart);
        assert_eq!(engine.balance(), 98.0);
        let events = engine.drain_events();
        assert!(events.contains(&EngineEvent::EntranceRequested {
            slots: [0.0, 2.0, 5.0]
        }));

        // Reveals before the deal finishes are dropped
        engine.dispatch(Intent::Reveal(0));
        assert!(engine.round().unwrap().reveal_order().is_empty());

        engine.dispatch(Completion::Entrance);
        assert_eq!(engine.phase(), RoundPhase::Reveal);

        engine.dispatch(Intent::Reveal(1));
        engine.dispatch(Intent::Reveal(1));
        engine.dispatch(Intent::Reveal(2));
        engine.dispatch(Intent::Reveal(0));
        assert_eq!(engine.round().unwrap().reveal_order(), &[1, 2, 0]);
        let flips = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, EngineEvent::FlipRequested { .. }))
            .count();
        assert_eq!(flips, 3);

        // Settlement waits for the last revealed card's flip
        engine.dispatch(Completion::Flip(1));
        engine.dispatch(Completion::Flip(2));
        assert_eq!(engine.phase(), RoundPhase::Reveal);
        engine.dispatch(Completion::Flip(0));
        assert_eq!(engine.phase(), RoundPhase::Result);
        assert_eq!(engine.balance(), 118.0);

        let events = engine.drain_events();
        let record = events
            .iter()
            .find_map(|e| match e {
                EngineEvent::ResultRequested(r) => Some(r.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(record.multipliers, vec![2.0, 5.0, 0.0]);
        assert_eq!(record.payout, 20.0);

        engine.dispatch(Completion::Result);
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert!(engine.round().is_none());
        assert_eq!(
            phases(&engine.drain_events()),
            vec![RoundPhase::Idle]
        );
    }

    #[test]
    fn test_stray_completions_are_ignored() {
        let mut engine = engine(vec![[1.0, 1.0, 1.0]], 1.0, 100.0);
        engine.dispatch(Completion::Entrance);
        engine.dispatch(Completion::Result);
        engine.dispatch(Completion::Flip(0));
        assert_eq!(engine.phase(), RoundPhase::Idle);

        engine.dispatch(Intent::StartRound);
        engine.dispatch(Completion::Entrance);
        engine.dispatch(Completion::Entrance);
        assert_eq!(engine.phase(), RoundPhase::Reveal);
        // No flip was requested for slot 2 or an out-of-range slot
        engine.dispatch(Completion::Flip(2));
        engine.dispatch(Completion::Flip(9));
        engine.dispatch(Intent::Reveal(9));
        assert_eq!(engine.phase(), RoundPhase::Reveal);
        assert!(engine.round().unwrap().reveal_order().is_empty());
    }

    #[test]
    fn test_double_start_is_ignored() {
        let mut engine = engine(vec![[1.0, 1.0, 1.0]], 1.0, 100.0);
        assert!(engine.start_round());
        assert!(!engine.start_round());
        assert_eq!(engine.balance(), 99.0);
    }

    #[test]
    fn test_auto_play_locks_manual_controls() {
        let mut engine = engine(vec![[1.0, 1.0, 1.0]], 2.0, 100.0);
        engine.dispatch(Intent::ToggleAutoPlay);
        assert!(engine.is_auto_playing());
        assert_eq!(engine.speed(), SpeedMode::Fast);
        assert_eq!(engine.auto_play().unwrap().rounds_remaining, 9);
        assert!(engine.drain_events().contains(&EngineEvent::AutoPlayChanged {
            active: true,
            rounds_remaining: 9
        }));

        assert_eq!(engine.adjust_bet(1.0), Err(BetRejection::RoundInProgress));
        engine.dispatch(Intent::ToggleSpeed);
        assert_eq!(engine.speed(), SpeedMode::Fast);
        engine.dispatch(Intent::StartRound);
        assert_eq!(engine.balance(), 98.0);

        engine.dispatch(Completion::Entrance);
        // Manual reveals are ignored; the controller already flipped slot 0
        engine.dispatch(Intent::Reveal(2));
        assert_eq!(engine.round().unwrap().reveal_order(), &[0]);
        assert!(!engine.controls().bet_enabled);
        assert!(!engine.controls().play_enabled);
    }

    #[test]
    fn test_failed_first_deal_closes_session() {
        let mut engine = engine(vec![[1.0, 1.0, 1.0]], 5.0, 100.0);
        // Cover gone by the time the session deals
        engine.economy = Economy::new(
            &EngineConfig::default(),
            Box::new(MemoryStore::with_state(PersistedState {
                bet: 5.0,
                balance: 4.0,
            })),
        );

        assert!(!engine.begin_auto_play());
        assert!(!engine.is_auto_playing());
        assert_eq!(engine.speed(), SpeedMode::Normal);
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(engine.balance(), 4.0);
        let events = engine.drain_events();
        assert_eq!(
            events.last(),
            Some(&EngineEvent::Status(Notice::AutoPlayFinished(
                StopReason::Unaffordable
            )))
        );
    }

    #[test]
    fn test_stop_request_waits_for_round_boundary() {
        let mut engine = engine(vec![[2.0, 1.0, 1.0]], 1.0, 100.0);
        engine.dispatch(Intent::ToggleAutoPlay);
        engine.dispatch(Completion::Entrance);
        engine.dispatch(Intent::ToggleAutoPlay);
        assert!(engine.auto_play().unwrap().stop_requested);

        // Round keeps going to settlement
        engine.dispatch(Completion::Flip(0));
        engine.dispatch(Completion::Flip(1));
        engine.dispatch(Completion::Flip(2));
        assert_eq!(engine.phase(), RoundPhase::Result);
        assert!(engine.is_auto_playing());

        engine.drain_events();
        engine.dispatch(Completion::Result);
        assert!(!engine.is_auto_playing());
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(engine.speed(), SpeedMode::Normal);
        assert_eq!(engine.rounds_played(), 1);
        assert_eq!(engine.balance(), 101.0);
        let events = engine.drain_events();
        assert!(events.contains(&EngineEvent::Status(Notice::AutoPlayFinished(
            StopReason::Requested
        ))));
    }

    #[test]
    fn test_auto_play_continues_without_visible_idle() {
        let mut engine = engine(vec![[1.0, 1.0, 1.0]], 1.0, 100.0);
        engine.dispatch(Intent::ToggleAutoPlay);
        engine.dispatch(Completion::Entrance);
        for slot in 0..CARD_COUNT {
            engine.dispatch(Completion::Flip(slot));
        }
        engine.drain_events();
        engine.dispatch(Completion::Result);
        let events = engine.drain_events();
        assert_eq!(phases(&events), vec![RoundPhase::RoundStart]);
        assert!(events.contains(&EngineEvent::PhaseChanged {
            from: RoundPhase::Result,
            to: RoundPhase::RoundStart
        }));
        assert_eq!(engine.auto_play().unwrap().rounds_remaining, 8);
    }

    #[test]
    fn test_speed_toggle_when_manual() {
        let mut engine = engine(vec![], 1.0, 100.0);
        engine.dispatch(Intent::ToggleSpeed);
        assert_eq!(engine.speed(), SpeedMode::Fast);
        assert_eq!(
            engine.drain_events(),
            vec![EngineEvent::SpeedChanged(SpeedMode::Fast)]
        );
    }

    #[test]
    fn test_seeded_engines_replay() {
        let table = MultiplierTable::new(vec![
            MultiplierEntry {
                value: 0.0,
                chance: 40.0,
            },
            MultiplierEntry {
                value: 1.0,
                chance: 30.0,
            },
            MultiplierEntry {
                value: 2.0,
                chance: 20.0,
            },
            MultiplierEntry {
                value: 5.0,
                chance: 10.0,
            },
        ])
        .unwrap();
        let run = |seed: u64| {
            let mut engine = Engine::seeded(
                EngineConfig::default(),
                table.clone(),
                Box::new(MemoryStore::new()),
                seed,
            )
            .unwrap();
            let mut hands = Vec::new();
            for _ in 0..5 {
                engine.dispatch(Intent::StartRound);
                hands.push(*engine.round().unwrap().assigned());
                engine.dispatch(Completion::Entrance);
                for slot in 0..CARD_COUNT {
                    engine.dispatch(Intent::Reveal(slot));
                    engine.dispatch(Completion::Flip(slot));
                }
                engine.dispatch(Completion::Result);
            }
            (hands, engine.balance())
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = EngineConfig {
            min_bet: 5.0,
            max_bet: 1.0,
            ..EngineConfig::default()
        };
        let result = Engine::new(
            config,
            Box::new(ScriptedDealer::new([])),
            Box::new(MemoryStore::new()),
        );
        assert!(matches!(result, Err(ConfigError::InvertedBetBounds { .. })));
    }

    #[test]
    fn test_bundled_defaults() {
        let engine = Engine::with_defaults(Box::new(MemoryStore::new()), 1).unwrap();
        assert_eq!(engine.bet(), 1.0);
        assert_eq!(engine.balance(), 100.0);
    }
}
