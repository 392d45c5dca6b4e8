//! Search configuration and target validation.
//!
//! Everything here is checked up front: a [`SearchConfig`] or [`Targets`]
//! that fails validation aborts the run before any enumeration starts.

use crate::divider::{Bounds, Reference};
use crate::error::{DivcalcError, Result};
use crate::series::{DecadeRange, Series};
use crate::{DEFAULT_DECADES, DEFAULT_LIMIT, DEFAULT_RSUM_MAX, DEFAULT_TOLERANCE, DEFAULT_VBAT_UV};

use super::{DEFAULT_DEVIATION_BAND, VBAT_OV_WINDOW, VOUT_WINDOW};

/// Hard constraints shared by every sub-problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    /// Upper bound on the sum of a network's resistors (Ω), `None` for unbounded
    pub rsum_max: Option<f64>,
    /// Require the 1 % worst-case VBAT_OV to stay at or below the target
    pub never_exceed_ov: bool,
    /// Resistor tolerance for the configurable worst-case band (fraction)
    pub tolerance: f64,
    /// Maximum candidates kept per sub-problem
    pub limit: usize,
    /// Relative deviation from target beyond which candidates are dropped
    pub deviation_band: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            rsum_max: Some(DEFAULT_RSUM_MAX),
            never_exceed_ov: false,
            tolerance: DEFAULT_TOLERANCE,
            limit: DEFAULT_LIMIT,
            deviation_band: DEFAULT_DEVIATION_BAND,
        }
    }
}

impl Constraints {
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(DivcalcError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if let Some(rsum_max) = self.rsum_max {
            if !(rsum_max > 0.0 && rsum_max.is_finite()) {
                return Err(DivcalcError::constraint(
                    "rsum-max",
                    format!("{rsum_max} Ω must be a positive, finite resistance"),
                ));
            }
        }
        if self.limit == 0 {
            return Err(DivcalcError::constraint("limit", "must keep at least one candidate"));
        }
        if !(self.deviation_band > 0.0 && self.deviation_band.is_finite()) {
            return Err(DivcalcError::constraint(
                "deviation-band",
                format!("{} must be a positive fraction", self.deviation_band),
            ));
        }
        Ok(())
    }
}

/// Configuration for a [`DividerSearch`](super::DividerSearch).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Preferred-value series to draw resistors from.
    pub series: Series,
    /// Inclusive decade range `(min, max)`.
    pub decades: (i32, i32),
    /// Bandgap reference used for nominal and worst-case trip voltages.
    pub reference: Reference,
    pub constraints: Constraints,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            series: Series::E24,
            decades: DEFAULT_DECADES,
            reference: Reference::default(),
            constraints: Constraints::default(),
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resistor series.
    pub fn with_series(mut self, series: Series) -> Self {
        self.series = series;
        self
    }

    /// Set the decade range, e.g. `(6, 7)` for 1 MΩ through 91 MΩ.
    pub fn with_decades(mut self, min: i32, max: i32) -> Self {
        self.decades = (min, max);
        self
    }

    /// Set the bandgap reference.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }

    /// Set the maximum total resistance per network (Ω).
    ///
    /// Keep this high: the chip's divider pins are sampled, and the
    /// string's quiescent current comes straight out of the battery.
    pub fn with_rsum_max(mut self, rsum_max: Option<f64>) -> Self {
        self.constraints.rsum_max = rsum_max;
        self
    }

    /// Require the 1 % worst-case VBAT_OV to never exceed the target.
    pub fn with_never_exceed_ov(mut self, never_exceed_ov: bool) -> Self {
        self.constraints.never_exceed_ov = never_exceed_ov;
        self
    }

    /// Set the resistor tolerance (fraction, 0.01 = 1 %).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.constraints.tolerance = tolerance;
        self
    }

    /// Set the number of candidates kept per sub-problem.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.constraints.limit = limit;
        self
    }

    /// Set the relative deviation band (fraction of target).
    pub fn with_deviation_band(mut self, deviation_band: f64) -> Self {
        self.constraints.deviation_band = deviation_band;
        self
    }

    /// Validate everything and return the decade range.
    pub fn validate(&self) -> Result<DecadeRange> {
        let range = DecadeRange::new(self.decades.0, self.decades.1)?;
        self.reference.validate()?;
        self.constraints.validate()?;
        Ok(range)
    }
}

/// VBAT_OK threshold pair plus the limits it must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkWindow {
    /// Falling threshold (V)
    pub prog: f64,
    /// Rising threshold (V)
    pub hyst: f64,
    /// Internal undervoltage reference (V)
    pub vbat_uv: f64,
    /// Overvoltage target, when one is configured (V)
    pub vbat_ov: Option<f64>,
}

impl OkWindow {
    pub fn new(prog: f64, hyst: f64) -> Self {
        Self {
            prog,
            hyst,
            vbat_uv: DEFAULT_VBAT_UV,
            vbat_ov: None,
        }
    }

    pub fn with_vbat_uv(mut self, vbat_uv: f64) -> Self {
        self.vbat_uv = vbat_uv;
        self
    }

    pub fn with_vbat_ov(mut self, vbat_ov: Option<f64>) -> Self {
        self.vbat_ov = vbat_ov;
        self
    }

    /// Check PROG >= VBAT_UV, HYST > PROG and HYST <= VBAT_OV.
    pub fn validate(&self) -> Result<()> {
        if !(self.vbat_uv > 0.0 && self.vbat_uv.is_finite()) {
            return Err(DivcalcError::target("VBAT_UV", self.vbat_uv, "must be positive"));
        }
        if !(self.prog >= self.vbat_uv) {
            return Err(DivcalcError::target(
                "VBAT_OK_PROG",
                self.prog,
                format!("must be >= VBAT_UV ({:.3} V)", self.vbat_uv),
            ));
        }
        if !(self.hyst > self.prog) {
            return Err(DivcalcError::target(
                "VBAT_OK_HYST",
                self.hyst,
                format!("must be > VBAT_OK_PROG ({:.3} V)", self.prog),
            ));
        }
        if let Some(ov) = self.vbat_ov {
            if self.hyst > ov {
                return Err(DivcalcError::target(
                    "VBAT_OK_HYST",
                    self.hyst,
                    format!("must be <= VBAT_OV ({ov:.3} V)"),
                ));
            }
        }
        Ok(())
    }

    /// Whether a realized (PROG, HYST) pair respects the window's limits.
    pub fn admits(&self, prog: f64, hyst: f64) -> bool {
        prog >= self.vbat_uv && hyst >= prog && self.vbat_ov.map_or(true, |ov| hyst <= ov)
    }
}

/// The set of sub-problems requested for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Targets {
    /// VOUT targets, each searched independently (V)
    pub vout: Vec<f64>,
    /// VBAT_OV target (V)
    pub vbat_ov: Option<f64>,
    /// VBAT_OK falling threshold (V)
    pub vbat_ok_prog: Option<f64>,
    /// VBAT_OK rising threshold (V)
    pub vbat_ok_hyst: Option<f64>,
    /// Internal undervoltage reference (V)
    pub vbat_uv: f64,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            vout: Vec::new(),
            vbat_ov: None,
            vbat_ok_prog: None,
            vbat_ok_hyst: None,
            vbat_uv: DEFAULT_VBAT_UV,
        }
    }
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vout(mut self, vout: impl IntoIterator<Item = f64>) -> Self {
        self.vout = vout.into_iter().collect();
        self
    }

    pub fn with_vbat_ov(mut self, vbat_ov: f64) -> Self {
        self.vbat_ov = Some(vbat_ov);
        self
    }

    pub fn with_vbat_ok(mut self, prog: f64, hyst: f64) -> Self {
        self.vbat_ok_prog = Some(prog);
        self.vbat_ok_hyst = Some(hyst);
        self
    }

    pub fn with_vbat_uv(mut self, vbat_uv: f64) -> Self {
        self.vbat_uv = vbat_uv;
        self
    }

    /// Whether no sub-problem is requested.
    pub fn is_empty(&self) -> bool {
        self.vout.is_empty()
            && self.vbat_ov.is_none()
            && self.vbat_ok_prog.is_none()
            && self.vbat_ok_hyst.is_none()
    }

    /// The VBAT_OK window, if requested. Both thresholds must be given together.
    pub fn ok_window(&self) -> Result<Option<OkWindow>> {
        match (self.vbat_ok_prog, self.vbat_ok_hyst) {
            (Some(prog), Some(hyst)) => Ok(Some(
                OkWindow::new(prog, hyst)
                    .with_vbat_uv(self.vbat_uv)
                    .with_vbat_ov(self.vbat_ov),
            )),
            (None, None) => Ok(None),
            _ => Err(DivcalcError::missing(
                "both VBAT_OK_PROG and VBAT_OK_HYST must be provided",
            )),
        }
    }

    /// Validate every requested target against the datasheet limits.
    pub fn validate(&self, constraints: &Constraints) -> Result<()> {
        for &v in &self.vout {
            check_window("VOUT", v, VOUT_WINDOW)?;
        }
        if let Some(ov) = self.vbat_ov {
            check_window("VBAT_OV", ov, VBAT_OV_WINDOW)?;
        } else if constraints.never_exceed_ov {
            return Err(DivcalcError::missing("never-exceed-OV requires a VBAT_OV target"));
        }
        if let Some(window) = self.ok_window()? {
            window.validate()?;
        }
        Ok(())
    }
}

/// Check that `value` lies inside the datasheet `window`.
pub(crate) fn check_window(name: &str, value: f64, window: Bounds) -> Result<()> {
    if !window.contains(value) {
        return Err(DivcalcError::target(
            name,
            value,
            format!("must be between {:.1} V and {:.1} V", window.min, window.max),
        ));
    }
    Ok(())
}
