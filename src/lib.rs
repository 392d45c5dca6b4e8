//! # Divcalc Core
//!
//! Resistor divider search for the configuration pins of a bq25570-class
//! energy-harvesting charger.
//!
//! This library provides:
//! - E24/E96 preferred-value pools over a range of decades
//! - Closed-form trip-voltage algebra with tolerance worst cases
//! - An exhaustive, deterministic search ranking candidate networks by
//!   closeness to target
//!
//! ## Architecture
//!
//! - [`series`] - Preferred-value series and decade ranges
//! - [`divider`] - Trip-voltage formulas and worst-case bounds
//! - [`search`] - Tuple enumeration, constraint filters and ranking
//! - [`report`] - Plain-text rendering of results
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! # Common rails
//! divcalc --vout 3.0 3.3
//!
//! # LiPo 1-cell, never trip above 4.2 V with 1 % parts
//! divcalc --vbat-ov 4.2 --never-exceed-ov
//!
//! # Battery-good window
//! divcalc --vbat-ok-prog 3.5 --vbat-ok-hyst 3.7
//! ```
//!
//! ### Library
//!
//! ```
//! use divcalc_core::{DividerSearch, SearchConfig, Series, Targets};
//!
//! let search = DividerSearch::new(SearchConfig::new().with_series(Series::E96))?;
//! let solution = search.solve(&Targets::new().with_vout([3.3]).with_vbat_ov(4.2))?;
//!
//! let best = &solution.vout[0].candidates[0];
//! assert!((best.output.nominal - 3.3).abs() < 0.05);
//! # Ok::<(), divcalc_core::DivcalcError>(())
//! ```
//!
//! ## Networks
//!
//! | Pin     | Resistors              | Trip voltage                        |
//! |---------|------------------------|-------------------------------------|
//! | VOUT    | R1 (bottom), R2        | `VBIAS * (1 + R2/R1)`               |
//! | VBAT_OV | R1 (bottom), R2        | `3/2 * VBIAS * (1 + R2/R1)`         |
//! | VBAT_OK | R_OK1, R_OK2, R_OK3    | PROG `VBIAS * (1 + R_OK2/R_OK1)`, HYST `VBIAS * (1 + (R_OK2+R_OK3)/R_OK1)` |

pub mod divider;
pub mod error;
pub mod report;
pub mod search;
pub mod series;

// Re-export main types for convenience
pub use divider::{Bounds, Reference, Threshold};
pub use error::{DivcalcError, Result};
pub use report::Report;
pub use search::{DividerSearch, SearchConfig, Solution, Targets};
pub use series::{DecadeRange, Series};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmDividerSearch;

/// Default upper bound on a network's total resistance (Ω).
///
/// Datasheet guidance for the high-impedance divider pins is about 13 MΩ
/// per string.
pub const DEFAULT_RSUM_MAX: f64 = 13e6;

/// Default number of candidates kept per sub-problem.
pub const DEFAULT_LIMIT: usize = 4;

/// Default resistor tolerance for the configurable worst-case band.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Default internal undervoltage reference (V).
pub const DEFAULT_VBAT_UV: f64 = 1.95;

/// Default decade range: 1 MΩ through 91 MΩ.
pub const DEFAULT_DECADES: (i32, i32) = (6, 7);
