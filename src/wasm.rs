//! WASM bindings for Divcalc Core.
//!
//! This module provides JavaScript-friendly bindings so the calculator can
//! run in a browser page.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmDividerSearch } from 'divcalc_core';
//!
//! await init();
//!
//! const search = new WasmDividerSearch("E96", 6, 7, 13e6, 4, 0.01, false);
//!
//! // Flat [bottom, top, rsum, nominal, ...] per candidate
//! const rows = search.vout(3.3);
//!
//! // Same text the CLI prints
//! console.log(search.report([3.3], 4.2, 3.5, 3.7, 1.95));
//! ```

use wasm_bindgen::prelude::*;

use crate::report::Report;
use crate::search::{DividerSearch, OkWindow, SearchConfig, Targets};
use crate::series::Series;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible divider search.
#[wasm_bindgen]
pub struct WasmDividerSearch {
    search: DividerSearch,
}

#[wasm_bindgen]
impl WasmDividerSearch {
    /// Create a search over a series and decade range.
    ///
    /// # Arguments
    /// * `series` - "E24" or "E96"
    /// * `min_decade`, `max_decade` - Inclusive decade range (6, 7 = 1-91 MΩ)
    /// * `rsum_max` - Max total resistance per network (Ω)
    /// * `limit` - Max candidates per sub-problem
    /// * `tolerance` - Resistor tolerance for the worst-case band
    /// * `never_exceed_ov` - Keep the 1% worst-case VBAT_OV at or below target
    #[wasm_bindgen(constructor)]
    pub fn new(
        series: &str,
        min_decade: i32,
        max_decade: i32,
        rsum_max: f64,
        limit: usize,
        tolerance: f64,
        never_exceed_ov: bool,
    ) -> Result<WasmDividerSearch, JsValue> {
        let series: Series = series.parse().map_err(js_err)?;
        let config = SearchConfig::new()
            .with_series(series)
            .with_decades(min_decade, max_decade)
            .with_rsum_max(Some(rsum_max))
            .with_limit(limit)
            .with_tolerance(tolerance)
            .with_never_exceed_ov(never_exceed_ov);
        let search = DividerSearch::new(config).map_err(js_err)?;
        Ok(WasmDividerSearch { search })
    }

    /// VOUT candidates as a flat `[bottom, top, rsum, nominal, ...]` array.
    #[wasm_bindgen]
    pub fn vout(&self, target: f64) -> Result<Vec<f64>, JsValue> {
        let candidates = self.search.vout(target).map_err(js_err)?;
        Ok(candidates
            .iter()
            .flat_map(|c| [c.bottom, c.top, c.rsum, c.output.nominal])
            .collect())
    }

    /// VBAT_OV candidates as a flat `[bottom, top, rsum, nominal, ...]` array.
    #[wasm_bindgen]
    pub fn overvoltage(&self, target: f64) -> Result<Vec<f64>, JsValue> {
        let candidates = self.search.overvoltage(target).map_err(js_err)?;
        Ok(candidates
            .iter()
            .flat_map(|c| [c.bottom, c.top, c.rsum, c.output.nominal])
            .collect())
    }

    /// VBAT_OK candidates as a flat `[bottom, mid, top, rsum, prog, hyst, ...]` array.
    #[wasm_bindgen]
    pub fn battery_ok(
        &self,
        prog: f64,
        hyst: f64,
        vbat_uv: f64,
        vbat_ov: Option<f64>,
    ) -> Result<Vec<f64>, JsValue> {
        let window = OkWindow::new(prog, hyst)
            .with_vbat_uv(vbat_uv)
            .with_vbat_ov(vbat_ov);
        let candidates = self.search.battery_ok(window).map_err(js_err)?;
        Ok(candidates
            .iter()
            .flat_map(|c| [c.bottom, c.mid, c.top, c.rsum, c.prog.nominal, c.hyst.nominal])
            .collect())
    }

    /// Run the requested sub-problems and return the rendered text report.
    #[wasm_bindgen]
    pub fn report(
        &self,
        vout: Vec<f64>,
        vbat_ov: Option<f64>,
        vbat_ok_prog: Option<f64>,
        vbat_ok_hyst: Option<f64>,
        vbat_uv: f64,
    ) -> Result<String, JsValue> {
        let targets = Targets {
            vout,
            vbat_ov,
            vbat_ok_prog,
            vbat_ok_hyst,
            vbat_uv,
        };
        let solution = self.search.solve(&targets).map_err(js_err)?;
        Ok(Report::new(&solution).to_string())
    }

    /// Number of values in the resistor pool.
    #[wasm_bindgen(getter)]
    pub fn pool_size(&self) -> usize {
        self.search.pool().len()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
