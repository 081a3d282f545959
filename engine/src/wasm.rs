use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use crate::image_loader::{load_image_bytes, Assets};
use crate::model::{Report, ReportKind};
use crate::LayoutConfig;

/// Render one report from the browser form. `kind` is the report's
/// kebab-case name and `data` the submitted data object; images arrive as
/// raw file bytes.
#[wasm_bindgen]
pub fn render_report(
    kind: &str,
    data: JsValue,
    logo: Option<Vec<u8>>,
    schedule_image: Option<Vec<u8>>,
) -> Result<Vec<u8>, JsValue> {
    let kind = ReportKind::from_name(kind)
        .ok_or_else(|| JsValue::from_str(&format!("unknown report kind '{}'", kind)))?;
    let json: serde_json::Value = serde_wasm_bindgen::from_value(data)
        .map_err(|e| JsValue::from_str(&format!("invalid report data: {}", e)))?;
    let report = Report::from_json(kind, &json.to_string())
        .map_err(|e| JsValue::from_str(&crate::FolioError::from(e).to_string()))?;

    let mut assets = Assets::new();
    if let Some(bytes) = logo {
        let image = load_image_bytes(&bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        assets = assets.with_logo(image);
    }
    if let Some(bytes) = schedule_image {
        let image = load_image_bytes(&bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        assets = assets.with_schedule_image(image);
    }

    crate::render_with_date(&report, &assets, &LayoutConfig::default(), today()?)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn today() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    let (year, month, day) = (now.get_full_year(), now.get_month() + 1, now.get_date());
    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| JsValue::from_str(&format!("invalid browser date {}-{}-{}", year, month, day)))
}
