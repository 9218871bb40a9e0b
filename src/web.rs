//! Browser bindings
//!
//! A page drives the engine through [`WebEngine`]: forward clicks as intents,
//! acknowledge every animation the engine asks for, and poll
//! `drain_events` each frame. Events cross the boundary as a JSON array.

use wasm_bindgen::prelude::*;

use crate::engine::{Completion, Engine, EngineEvent, Intent, MultiplierTable, Rarity};
use crate::persistence::LocalStorageStore;
use crate::settings::EngineConfig;
use crate::{format_amount, format_multiplier};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Tarot Draw starting...");
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Event encoding failed: {e}");
        "[]".to_string()
    })
}

#[wasm_bindgen]
pub struct WebEngine {
    engine: Engine,
    table: MultiplierTable,
}

#[wasm_bindgen]
impl WebEngine {
    /// Engine with the bundled table, default config and LocalStorage
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebEngine, JsValue> {
        let table = MultiplierTable::bundled().map_err(js_error)?;
        let seed = js_sys::Date::now() as u64;
        let engine = Engine::seeded(
            EngineConfig::default(),
            table.clone(),
            Box::new(LocalStorageStore),
            seed,
        )
        .map_err(js_error)?;
        log::info!("Engine initialized with seed: {seed}");
        Ok(Self { engine, table })
    }

    /// Engine from JSON config and table documents. Invalid input is
    /// rejected here rather than at play time.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str, table_json: &str, seed: f64) -> Result<WebEngine, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(js_error)?;
        let table = MultiplierTable::from_json(table_json).map_err(js_error)?;
        let engine = Engine::seeded(
            config,
            table.clone(),
            Box::new(LocalStorageStore),
            seed as u64,
        )
        .map_err(js_error)?;
        Ok(Self { engine, table })
    }

    // ---------- Intents ----------

    #[wasm_bindgen(js_name = startRound)]
    pub fn start_round(&mut self) {
        self.engine.dispatch(Intent::StartRound);
    }

    pub fn reveal(&mut self, slot: usize) {
        self.engine.dispatch(Intent::Reveal(slot));
    }

    #[wasm_bindgen(js_name = betUp)]
    pub fn bet_up(&mut self) {
        let step = self.engine.config().bet_step;
        self.engine.dispatch(Intent::AdjustBet(step));
    }

    #[wasm_bindgen(js_name = betDown)]
    pub fn bet_down(&mut self) {
        let step = self.engine.config().bet_step;
        self.engine.dispatch(Intent::AdjustBet(-step));
    }

    #[wasm_bindgen(js_name = toggleAutoPlay)]
    pub fn toggle_auto_play(&mut self) {
        self.engine.dispatch(Intent::ToggleAutoPlay);
    }

    #[wasm_bindgen(js_name = toggleSpeed)]
    pub fn toggle_speed(&mut self) {
        self.engine.dispatch(Intent::ToggleSpeed);
    }

    // ---------- Completions ----------

    #[wasm_bindgen(js_name = entranceDone)]
    pub fn entrance_done(&mut self) {
        self.engine.dispatch(Completion::Entrance);
    }

    #[wasm_bindgen(js_name = flipDone)]
    pub fn flip_done(&mut self, slot: usize) {
        self.engine.dispatch(Completion::Flip(slot));
    }

    #[wasm_bindgen(js_name = resultDone)]
    pub fn result_done(&mut self) {
        self.engine.dispatch(Completion::Result);
    }

    // ---------- Output ----------

    /// Pending events as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        let events: Vec<EngineEvent> = self.engine.drain_events();
        to_json(&events)
    }

    pub fn phase(&self) -> String {
        self.engine.phase().as_str().to_string()
    }

    pub fn bet(&self) -> String {
        format_amount(self.engine.bet())
    }

    pub fn balance(&self) -> String {
        format_amount(self.engine.balance())
    }

    #[wasm_bindgen(js_name = speedLabel)]
    pub fn speed_label(&self) -> String {
        self.engine.speed().label()
    }

    /// Result panel text for the last settled round
    #[wasm_bindgen(js_name = resultText)]
    pub fn result_text(&self) -> Option<String> {
        self.engine.last_result().map(|r| r.summary())
    }

    /// Pay table rows (value, rarity, percent) as JSON
    #[wasm_bindgen(js_name = payTableJson)]
    pub fn pay_table_json(&self) -> String {
        to_json(&self.table.pay_table())
    }

    /// Seconds each animation should take at the current speed
    #[wasm_bindgen(js_name = timingsJson)]
    pub fn timings_json(&self) -> String {
        let speed = self.engine.speed();
        to_json(&serde_json::json!({
            "flip": speed.flip_duration(),
            "shuffle": speed.shuffle_duration(),
            "result": speed.result_display(),
        }))
    }

    /// Card face text and colour for a multiplier
    #[wasm_bindgen(js_name = cardFace)]
    pub fn card_face(value: f64) -> String {
        let rarity = Rarity::of(value);
        to_json(&serde_json::json!({
            "text": format_multiplier(value),
            "rarity": rarity,
            "color": rarity.color(),
        }))
    }
}
