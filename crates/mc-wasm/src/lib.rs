// ============================================================================
// MIND CIRCUS: WASM Port
// Browser bindings driving an Arcade from JavaScript
// Time comes from performance.now(); views cross the boundary as JS objects
// ============================================================================

mod session;

pub use session::Session;

use mc_arcade::{Arcade, ArcadeConfig, ContentBanks};
use mc_core::{ArcadeError, Clock};
use mc_stage::StageCatalog;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// INITIALIZATION
// ============================================================================

#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log::init_with_level(log::Level::Debug).ok();
    log::info!("[MindCircus WASM] Initialized");
}

// ============================================================================
// CLOCK
// ============================================================================

/// Milliseconds from `performance.now()`, falling back to `Date.now()`
/// where no `Performance` object exists (workers without a window)
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

fn js_error(err: ArcadeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

// ============================================================================
// MIND CIRCUS
// ============================================================================

#[wasm_bindgen]
pub struct MindCircus {
    session: Session<PerformanceClock>,
}

#[wasm_bindgen]
impl MindCircus {
    /// Open the built-in arcade. Without a seed the session is unpredictable.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> Result<MindCircus, JsValue> {
        let mut config = ArcadeConfig::default();
        config.seed = seed.map(u64::from);
        Self::open(config, StageCatalog::mind_circus(), ContentBanks::mind_circus())
    }

    /// Open an arcade from JSON documents. Missing documents use the built-ins.
    #[wasm_bindgen]
    pub fn from_json(
        config_json: Option<String>,
        catalog_json: Option<String>,
        content_json: Option<String>,
    ) -> Result<MindCircus, JsValue> {
        let config = match config_json {
            Some(json) => ArcadeConfig::from_json(&json).map_err(js_error)?,
            None => ArcadeConfig::default(),
        };
        let catalog = match catalog_json {
            Some(json) => StageCatalog::from_json(&json).map_err(js_error)?,
            None => StageCatalog::mind_circus(),
        };
        let content = match content_json {
            Some(json) => ContentBanks::from_json(&json).map_err(js_error)?,
            None => ContentBanks::mind_circus(),
        };
        Self::open(config, catalog, content)
    }

    fn open(
        config: ArcadeConfig,
        catalog: StageCatalog,
        content: ContentBanks,
    ) -> Result<MindCircus, JsValue> {
        let arcade = Arcade::new(config, catalog, content).map_err(js_error)?;
        Ok(MindCircus {
            session: Session::new(arcade, PerformanceClock::new()),
        })
    }

    // ════════════════════════════════════════════════════════════════════════
    // GAMEPLAY
    // ════════════════════════════════════════════════════════════════════════

    /// Switch stage. Returns false if it was already active.
    #[wasm_bindgen]
    pub fn select_stage(&mut self, id: &str) -> Result<bool, JsValue> {
        self.session.select_stage(id).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn start(&mut self) {
        self.session.start();
    }

    /// Fire due timers; true if the screen should redraw
    #[wasm_bindgen]
    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    /// Reflex tap. Resolves to the round outcome or `undefined`.
    #[wasm_bindgen]
    pub fn tap(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.session.tap().map_err(js_error)?;
        to_js(&outcome)
    }

    #[wasm_bindgen]
    pub fn guess(&mut self, symbol: &str) -> Result<JsValue, JsValue> {
        let outcome = self.session.guess(symbol).map_err(js_error)?;
        to_js(&outcome)
    }

    #[wasm_bindgen]
    pub fn answer(&mut self, choice: u32) -> Result<JsValue, JsValue> {
        let outcome = self.session.answer(choice as usize).map_err(js_error)?;
        to_js(&outcome)
    }

    // ════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ════════════════════════════════════════════════════════════════════════

    /// Milliseconds until `tick` has work to do
    #[wasm_bindgen]
    pub fn ms_until_tick(&self) -> Option<f64> {
        self.session.ms_until_deadline()
    }

    /// Full arcade snapshot as a JS object
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view())
    }

    #[wasm_bindgen]
    pub fn active_stage(&self) -> String {
        self.session.arcade().active_stage_id().to_string()
    }

    #[wasm_bindgen]
    pub fn stages(&self) -> Result<JsValue, JsValue> {
        let stages: Vec<_> = self.session.arcade().catalog().iter().collect();
        to_js(&stages)
    }

    #[wasm_bindgen]
    pub fn journal_json(&self) -> Result<String, JsValue> {
        self.session.arcade().journal().to_json().map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn reset_stats(&mut self) {
        self.session.arcade_mut().reset_stats();
    }
}

// ============================================================================
// UTILITY EXPORTS
// ============================================================================

/// Get Mind Circus version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default arcade configuration as JSON, for hosts that want to tweak it
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsValue> {
    ArcadeConfig::default().to_json().map_err(js_error)
}

// ============================================================================
// TESTS
// ============================================================================
