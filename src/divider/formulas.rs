//! Trip-voltage formulas and their worst-case corners.

use super::{Bounds, Reference, Threshold, ONE_PERCENT, OV_SCALE};

/// One comparator tap: `V = scale * vbias * (1 + upper / bottom)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    pub scale: f64,
}

impl Tap {
    /// VOUT and VBAT_OK comparators.
    pub const UNITY: Tap = Tap { scale: 1.0 };

    /// VBAT_OV comparator.
    pub const OVERVOLTAGE: Tap = Tap { scale: OV_SCALE };

    /// Trip voltage for a bottom resistor and the sum of resistors above the tap.
    pub fn output(&self, bottom: f64, upper: f64, vbias: f64) -> f64 {
        debug_assert!(bottom > 0.0, "bottom resistor must be positive");
        self.scale * vbias * (1.0 + upper / bottom)
    }

    /// Worst-case trip voltages with every resistor off by `tolerance`.
    pub fn bounds(&self, bottom: f64, upper: f64, tolerance: f64, reference: &Reference) -> Bounds {
        let lo = 1.0 - tolerance;
        let hi = 1.0 + tolerance;
        Bounds {
            min: self.output(bottom * hi, upper * lo, reference.min),
            max: self.output(bottom * lo, upper * hi, reference.max),
        }
    }

    /// Nominal trip voltage plus the 1 % and `tolerance` bands.
    pub fn threshold(
        &self,
        bottom: f64,
        upper: f64,
        tolerance: f64,
        reference: &Reference,
    ) -> Threshold {
        Threshold {
            nominal: self.output(bottom, upper, reference.typ),
            one_percent: self.bounds(bottom, upper, ONE_PERCENT, reference),
            at_tolerance: self.bounds(bottom, upper, tolerance, reference),
        }
    }
}

/// Falling battery-OK threshold, tapped between R_OK1 and R_OK2.
pub fn vbat_ok_prog(r1: f64, r2: f64, vbias: f64) -> f64 {
    Tap::UNITY.output(r1, r2, vbias)
}

/// Rising battery-OK threshold, tapped between R_OK1 and R_OK2 + R_OK3.
pub fn vbat_ok_hyst(r1: f64, r2: f64, r3: f64, vbias: f64) -> f64 {
    Tap::UNITY.output(r1, r2 + r3, vbias)
}

/// (PROG, HYST) thresholds for the three-resistor battery-OK string.
///
/// Each threshold gets its own worst-case corners.
pub fn ok_thresholds(
    r1: f64,
    r2: f64,
    r3: f64,
    tolerance: f64,
    reference: &Reference,
) -> (Threshold, Threshold) {
    (
        Tap::UNITY.threshold(r1, r2, tolerance, reference),
        Tap::UNITY.threshold(r1, r2 + r3, tolerance, reference),
    )
}
