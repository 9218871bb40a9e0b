//! Headless presentation
//!
//! Stands in for a renderer: every animation request is acknowledged at
//! once, so whole rounds and auto-play sessions run synchronously. Used by
//! the simulator binary and the tests.

use std::collections::VecDeque;

use crate::consts::CARD_COUNT;
use crate::engine::{
    Completion, Dealer, Engine, EngineEvent, Input, Intent, Notice, ResultRecord, StopReason,
};
use crate::stats::SessionStats;

/// Deals pre-arranged hands in order, then repeats the last one
#[derive(Debug, Clone)]
pub struct ScriptedDealer {
    hands: VecDeque<[f64; CARD_COUNT]>,
    last: [f64; CARD_COUNT],
}

impl ScriptedDealer {
    pub fn new(hands: impl IntoIterator<Item = [f64; CARD_COUNT]>) -> Self {
        Self {
            hands: hands.into_iter().collect(),
            last: [0.0; CARD_COUNT],
        }
    }
}

impl Dealer for ScriptedDealer {
    fn deal(&mut self) -> [f64; CARD_COUNT] {
        if let Some(hand) = self.hands.pop_front() {
            self.last = hand;
        }
        self.last
    }
}

/// Drives an engine with instant animations
#[derive(Debug)]
pub struct HeadlessDriver {
    engine: Engine,
    stats: SessionStats,
    history: Vec<EngineEvent>,
}

impl HeadlessDriver {
    pub fn new(engine: Engine) -> Self {
        let mut driver = Self {
            engine,
            stats: SessionStats::new(),
            history: Vec::new(),
        };
        driver.pump();
        driver
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Every event seen so far, in emission order
    pub fn history(&self) -> &[EngineEvent] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Dispatch an input and run until the engine has nothing left to ask for
    pub fn send(&mut self, input: impl Into<Input>) {
        self.engine.dispatch(input);
        self.pump();
    }

    fn pump(&mut self) {
        loop {
            let events = self.engine.drain_events();
            if events.is_empty() {
                break;
            }
            let mut owed: Vec<Completion> = Vec::new();
            for event in events {
                if let EngineEvent::ResultRequested(record) = &event {
                    self.stats.record(record);
                }
                if let Some(completion) = event.expects_completion() {
                    owed.push(completion);
                }
                self.history.push(event);
            }
            for completion in owed {
                self.engine.dispatch(completion);
            }
        }
    }

    /// Play one manual round revealing slots in `order`.
    /// Returns the settled result, or `None` if the round didn't start.
    pub fn play_manual_round(&mut self, order: [usize; CARD_COUNT]) -> Option<ResultRecord> {
        let before = self.engine.rounds_played();
        self.send(Intent::StartRound);
        for slot in order {
            self.send(Intent::Reveal(slot));
        }
        (self.engine.rounds_played() > before)
            .then(|| self.engine.last_result().cloned())
            .flatten()
    }

    /// Run a full auto-play session. Returns why it ended, or `None` if it
    /// never started.
    pub fn run_auto_play(&mut self) -> Option<StopReason> {
        let mark = self.history.len();
        self.send(Intent::ToggleAutoPlay);
        self.history[mark..].iter().rev().find_map(|event| match event {
            EngineEvent::Status(Notice::AutoPlayFinished(reason)) => Some(*reason),
            _ => None,
        })
    }
}
