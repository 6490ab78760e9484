//! Browser bindings for the landslide dashboard.
//!
//! Every prediction the page shows goes through the deterministic scorer in
//! `slide-core`; nothing here draws random numbers.
use chrono::{DateTime, Utc};
use serde::Serialize;
use slide_core::{wire, ScoringMode};
use wasm_bindgen::prelude::*;

pub mod dashboard;

use dashboard::DashboardState;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

fn mode(strict: bool) -> ScoringMode {
    if strict {
        ScoringMode::Strict
    } else {
        ScoringMode::Permissive
    }
}

/// Score a request JSON string.
/// Resolves to `{result, probability, riskScore, factors}`; rejects with `{error}`.
#[wasm_bindgen]
pub fn predict(request_json: &str, strict: Option<bool>) -> Result<JsValue, JsValue> {
    match wire::predict(request_json.as_bytes(), mode(strict.unwrap_or(false))) {
        Ok(resp) => to_js(&resp),
        Err(e) => Err(to_js(&e.to_response())?),
    }
}

/// One browser tab's worth of prediction history and table state.
#[wasm_bindgen]
pub struct Dashboard {
    state: DashboardState,
}

#[wasm_bindgen]
impl Dashboard {
    #[wasm_bindgen(constructor)]
    pub fn new(strict: Option<bool>) -> Dashboard {
        Dashboard {
            state: DashboardState::new(mode(strict.unwrap_or(false))),
        }
    }

    /// Record a manual-input observation; returns the stored prediction.
    pub fn submit(&mut self, observation_json: &str) -> Result<JsValue, JsValue> {
        match self.state.submit(observation_json, now()) {
            Ok(p) => to_js(&p),
            Err(e) => Err(to_js(&e)?),
        }
    }

    /// Parse a dropped or selected file; returns `{fileName, totalRows, rows}`.
    pub fn upload(&mut self, file_name: &str, csv_text: &str) -> Result<JsValue, JsValue> {
        match self.state.upload(file_name, csv_text) {
            Ok(preview) => to_js(preview),
            Err(e) => Err(to_js(&e)?),
        }
    }

    #[wasm_bindgen(js_name = loadDemo)]
    pub fn load_demo(&mut self) -> Result<JsValue, JsValue> {
        to_js(self.state.load_demo())
    }

    #[wasm_bindgen(js_name = processUpload)]
    pub fn process_upload(&mut self) -> Result<usize, JsValue> {
        self.state.process_upload(now()).map_err(|e| to_js(&e).unwrap_or_else(|err| err))
    }

    #[wasm_bindgen(js_name = clearUpload)]
    pub fn clear_upload(&mut self) {
        self.state.clear_upload();
    }

    /// Status-card aggregates.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.summary())
    }

    #[wasm_bindgen(js_name = setSearch)]
    pub fn set_search(&mut self, term: &str) {
        self.state.set_search(term);
    }

    /// `column` is one of timestamp, slope, rainfall, result, probability.
    #[wasm_bindgen(js_name = toggleSort)]
    pub fn toggle_sort(&mut self, column: &str) -> Result<(), JsValue> {
        self.state.toggle_sort(column).map_err(|e| JsValue::from_str(&e.error))
    }

    /// Filtered and sorted table rows.
    pub fn rows(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.rows())
    }

    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> Result<String, JsValue> {
        self.state.export_csv().map_err(|e| JsValue::from_str(&e.error))
    }

    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name() -> String {
        slide_core::EXPORT_FILE_NAME.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.state.len()
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }
}
