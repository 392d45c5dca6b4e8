//! Closed-form divider algebra.
//!
//! Every comparator input on the charger is fed by a resistor string between
//! the sensed rail and ground, compared against the internal bandgap
//! reference `VBIAS`. With the bottom resistor `Rb` and everything above the
//! tap summed into `Ru`, the rail voltage at which the comparator trips is:
//!
//! ```text
//! V = k * VBIAS * (1 + Ru / Rb)
//! ```
//!
//! where `k` is the comparator's internal scale (1 for VOUT and VBAT_OK,
//! 3/2 for VBAT_OV). See [`Tap`].
//!
//! ## Worst case
//!
//! `V` falls as `Rb` grows and rises as `Ru` grows, so the two resistors move
//! to *opposite* tolerance extremes at each corner:
//!
//! | corner | Rb       | Ru       | VBIAS       |
//! |--------|----------|----------|-------------|
//! | min    | Rb·(1+t) | Ru·(1−t) | VBIAS_MIN   |
//! | max    | Rb·(1−t) | Ru·(1+t) | VBIAS_MAX   |
//!
//! Scaling a sum of upper resistors by `(1±t)` scales each term by the same
//! factor, so three-resistor taps reuse the same corners.

mod formulas;

pub use formulas::{ok_thresholds, vbat_ok_hyst, vbat_ok_prog, Tap};

use crate::error::{DivcalcError, Result};

/// Typical bandgap reference (V).
pub const VBIAS_TYP: f64 = 1.21;

/// Minimum bandgap reference over process and temperature (V).
pub const VBIAS_MIN: f64 = 1.205;

/// Maximum bandgap reference over process and temperature (V).
pub const VBIAS_MAX: f64 = 1.217;

/// Internal scale of the overvoltage comparator.
pub const OV_SCALE: f64 = 1.5;

/// The fixed 1 % band reported for every candidate.
pub const ONE_PERCENT: f64 = 0.01;

/// Bandgap reference with its datasheet spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    pub typ: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for Reference {
    fn default() -> Self {
        Self {
            typ: VBIAS_TYP,
            min: VBIAS_MIN,
            max: VBIAS_MAX,
        }
    }
}

impl Reference {
    /// Create a reference from explicit corners.
    pub fn new(typ: f64, min: f64, max: f64) -> Result<Self> {
        let reference = Self { typ, min, max };
        reference.validate()?;
        Ok(reference)
    }

    /// Create a reference around `typ`, keeping the datasheet's relative spread.
    pub fn with_typical(typ: f64) -> Result<Self> {
        Self::new(
            typ,
            typ * VBIAS_MIN / VBIAS_TYP,
            typ * VBIAS_MAX / VBIAS_TYP,
        )
    }

    /// Check `0 < min <= typ <= max`.
    pub fn validate(&self) -> Result<()> {
        if !(self.typ.is_finite() && self.min.is_finite() && self.max.is_finite()) {
            return Err(DivcalcError::InvalidReference {
                message: "reference voltages must be finite".to_string(),
            });
        }
        if self.min <= 0.0 {
            return Err(DivcalcError::InvalidReference {
                message: format!("minimum {:.3} V must be positive", self.min),
            });
        }
        if !(self.min <= self.typ && self.typ <= self.max) {
            return Err(DivcalcError::InvalidReference {
                message: format!(
                    "expected min <= typ <= max, got {:.3} / {:.3} / {:.3} V",
                    self.min, self.typ, self.max
                ),
            });
        }
        Ok(())
    }
}

/// A closed voltage interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Whether `value` lies inside the interval (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A nominal trip voltage together with its worst-case bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    /// Trip voltage with nominal resistors and typical reference
    pub nominal: f64,
    /// Worst case with 1 % resistors
    pub one_percent: Bounds,
    /// Worst case at the configured tolerance
    pub at_tolerance: Bounds,
}

#[cfg(test)]
impl Bounds {
    /// Whether `other` lies entirely inside this interval.
    pub(crate) fn encloses(&self, other: &Bounds) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}
