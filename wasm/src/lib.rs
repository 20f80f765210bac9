//! WebAssembly module for the Farm Navigator platform
//!
//! Provides client-side computation for:
//! - Full offline simulation runs over JSON payloads
//! - Crop condition classification
//! - Badge display metadata lookups
//! - Offline data validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// A complete simulation request supplied from JavaScript
#[derive(Debug, Deserialize)]
struct SimulationRequest {
    from_date: NaiveDate,
    to_date: NaiveDate,
    #[serde(default)]
    actions: Vec<Action>,
    ndvi_history: Vec<NdviRecord>,
    weather_history: Vec<WeatherRecord>,
}

/// Run a full simulation over a JSON request, returning the JSON result
#[wasm_bindgen]
pub fn run_plan_simulation(request_json: &str) -> Result<String, JsValue> {
    simulate(request_json).map_err(|e| JsValue::from_str(&e))
}

fn simulate(request_json: &str) -> Result<String, String> {
    let request: SimulationRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Invalid request JSON: {}", e))?;

    validate_date_range(request.from_date, request.to_date).map_err(str::to_string)?;
    let range = DateRange::new(request.from_date, request.to_date);
    validate_actions(&request.actions, &range).map_err(str::to_string)?;
    validate_ndvi_history(&request.ndvi_history).map_err(str::to_string)?;

    let result = shared::run_simulation(
        &range,
        &request.actions,
        &request.ndvi_history,
        &request.weather_history,
    );

    serde_json::to_string(&result).map_err(|e| format!("Failed to serialize result: {}", e))
}

/// Classify a day's crop condition from soil moisture and nutrient levels
#[wasm_bindgen]
pub fn classify_crop_condition(soil_moisture: f64, nutrients: f64) -> String {
    let soil = Decimal::try_from(soil_moisture).unwrap_or(Decimal::ZERO);
    let nutrients = Decimal::try_from(nutrients).unwrap_or(Decimal::ZERO);
    format!("{}", classify_condition(soil, nutrients))
}

/// Scale an NDVI value to a whole yield percentage
#[wasm_bindgen]
pub fn ndvi_to_yield_percent(ndvi: f64) -> f64 {
    (ndvi * 100.0).round()
}

/// Get the display description for a badge name
#[wasm_bindgen]
pub fn badge_description(name: &str) -> String {
    badge_info_by_name(name).description.to_string()
}

/// Get the display icon identifier for a badge name
#[wasm_bindgen]
pub fn badge_icon(name: &str) -> String {
    badge_info_by_name(name).icon.to_string()
}

/// Validate an action amount entered in the planner UI
#[wasm_bindgen]
pub fn is_valid_action_amount(amount: f64) -> bool {
    amount >= 0.0 && amount.is_finite()
}
