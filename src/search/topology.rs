//! Divider topologies and the candidates they produce.
//!
//! A [`Topology`] turns one resistor tuple into a scored candidate, or
//! rejects it. The enumeration loop knows nothing about the circuit; it only
//! feeds tuples of [`Topology::ARITY`] pool values, bottom resistor first.

use crate::divider::{
    ok_thresholds, vbat_ok_hyst, vbat_ok_prog, Reference, Tap, Threshold, ONE_PERCENT,
};

use super::config::{Constraints, OkWindow};
use super::NEVER_EXCEED_SLACK;

/// Something the ranker can order: lower score first, then lower total resistance.
pub trait Ranked {
    /// Absolute deviation from target (V).
    fn score(&self) -> f64;
    /// Sum of all resistors in the network (Ω).
    fn rsum(&self) -> f64;
}

/// A divider network shape evaluated by the generic search.
pub trait Topology {
    type Candidate: Ranked;

    /// Number of resistors in the network.
    const ARITY: usize;

    /// Evaluate a tuple (bottom first) whose values sum to `rsum`.
    ///
    /// Returns `None` when the tuple fails the topology's filters.
    fn evaluate(&self, resistors: &[f64], rsum: f64) -> Option<Self::Candidate>;
}

/// A two-resistor divider: R1 (bottom) and R2 (top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCandidate {
    pub bottom: f64,
    pub top: f64,
    pub rsum: f64,
    pub output: Threshold,
    pub error: f64,
}

impl Ranked for PairCandidate {
    fn score(&self) -> f64 {
        self.error
    }

    fn rsum(&self) -> f64 {
        self.rsum
    }
}

/// A three-resistor VBAT_OK string: R_OK1 (bottom), R_OK2 (mid), R_OK3 (top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkCandidate {
    pub bottom: f64,
    pub mid: f64,
    pub top: f64,
    pub rsum: f64,
    pub prog: Threshold,
    pub hyst: Threshold,
    /// |PROG - target| + |HYST - target|
    pub error: f64,
}

impl Ranked for OkCandidate {
    fn score(&self) -> f64 {
        self.error
    }

    fn rsum(&self) -> f64 {
        self.rsum
    }
}

/// VOUT or VBAT_OV divider searched against a single target.
#[derive(Debug, Clone, PartialEq)]
pub struct PairDivider {
    pub tap: Tap,
    pub target: f64,
    pub reference: Reference,
    pub tolerance: f64,
    pub deviation_band: f64,
    /// Ceiling for the 1 % worst-case maximum, when never-exceed is active
    pub ceiling: Option<f64>,
}

impl PairDivider {
    /// Output voltage divider.
    pub fn vout(target: f64, reference: Reference, constraints: &Constraints) -> Self {
        Self {
            tap: Tap::UNITY,
            target,
            reference,
            tolerance: constraints.tolerance,
            deviation_band: constraints.deviation_band,
            ceiling: None,
        }
    }

    /// Overvoltage divider; the target doubles as ceiling under never-exceed.
    pub fn overvoltage(target: f64, reference: Reference, constraints: &Constraints) -> Self {
        Self {
            tap: Tap::OVERVOLTAGE,
            target,
            reference,
            tolerance: constraints.tolerance,
            deviation_band: constraints.deviation_band,
            ceiling: constraints.never_exceed_ov.then_some(target),
        }
    }
}

impl Topology for PairDivider {
    type Candidate = PairCandidate;

    const ARITY: usize = 2;

    fn evaluate(&self, resistors: &[f64], rsum: f64) -> Option<PairCandidate> {
        let (bottom, top) = (resistors[0], resistors[1]);

        let nominal = self.tap.output(bottom, top, self.reference.typ);
        let error = (nominal - self.target).abs();
        if error > self.deviation_band * self.target {
            return None;
        }

        if let Some(ceiling) = self.ceiling {
            let worst = self.tap.bounds(bottom, top, ONE_PERCENT, &self.reference);
            if worst.max > ceiling + NEVER_EXCEED_SLACK {
                return None;
            }
        }

        Some(PairCandidate {
            bottom,
            top,
            rsum,
            output: self.tap.threshold(bottom, top, self.tolerance, &self.reference),
            error,
        })
    }
}

/// VBAT_OK three-resistor string searched against a PROG/HYST pair.
#[derive(Debug, Clone, PartialEq)]
pub struct OkDivider {
    pub window: OkWindow,
    pub reference: Reference,
    pub tolerance: f64,
    pub deviation_band: f64,
}

impl OkDivider {
    pub fn new(window: OkWindow, reference: Reference, constraints: &Constraints) -> Self {
        Self {
            window,
            reference,
            tolerance: constraints.tolerance,
            deviation_band: constraints.deviation_band,
        }
    }
}

impl Topology for OkDivider {
    type Candidate = OkCandidate;

    const ARITY: usize = 3;

    fn evaluate(&self, resistors: &[f64], rsum: f64) -> Option<OkCandidate> {
        let (bottom, mid, top) = (resistors[0], resistors[1], resistors[2]);
        let vbias = self.reference.typ;

        let prog = vbat_ok_prog(bottom, mid, vbias);
        let hyst = vbat_ok_hyst(bottom, mid, top, vbias);
        if !self.window.admits(prog, hyst) {
            return None;
        }

        let prog_error = (prog - self.window.prog).abs();
        let hyst_error = (hyst - self.window.hyst).abs();
        if prog_error > self.deviation_band * self.window.prog
            || hyst_error > self.deviation_band * self.window.hyst
        {
            return None;
        }

        let (prog, hyst) = ok_thresholds(bottom, mid, top, self.tolerance, &self.reference);
        Some(OkCandidate {
            bottom,
            mid,
            top,
            rsum,
            prog,
            hyst,
            error: prog_error + hyst_error,
        })
    }
}
