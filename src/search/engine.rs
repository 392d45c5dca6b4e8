//! Top-level search interface.

use log::debug;

use crate::error::Result;

use super::config::{check_window, OkWindow, SearchConfig, Targets};
use super::enumerate::enumerate;
use super::rank::rank;
use super::topology::{OkCandidate, OkDivider, PairCandidate, PairDivider, Topology};
use super::{VBAT_OV_WINDOW, VOUT_WINDOW};

/// One independently searched sub-problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubProblem {
    /// Output voltage divider
    Vout(f64),
    /// Battery overvoltage divider
    Overvoltage { target: f64, never_exceed: bool },
    /// Battery-OK three-resistor string
    BatteryOk { prog: f64, hyst: f64 },
}

/// Ranked candidates for one sub-problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<C> {
    pub problem: SubProblem,
    /// Best match first; empty when nothing satisfies the constraints
    pub candidates: Vec<C>,
}

/// Results of every requested sub-problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Tolerance the configurable worst-case band was computed at
    pub tolerance: f64,
    pub vout: Vec<Section<PairCandidate>>,
    pub overvoltage: Option<Section<PairCandidate>>,
    pub battery_ok: Option<Section<OkCandidate>>,
}

impl Solution {
    /// Number of sub-problems in this solution.
    pub fn sections(&self) -> usize {
        self.vout.len() + self.overvoltage.is_some() as usize + self.battery_ok.is_some() as usize
    }
}

/// Divider search over one value pool.
///
/// The pool is generated once from the configured series and decade range
/// and shared read-only by every sub-problem.
#[derive(Debug, Clone)]
pub struct DividerSearch {
    config: SearchConfig,
    pool: Vec<f64>,
}

impl DividerSearch {
    /// Validate `config` and build the value pool.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let range = config.validate()?;
        let pool = config.series.values(range);
        debug!(
            "{} pool over decades {}..={}: {} values",
            config.series,
            range.min(),
            range.max(),
            pool.len()
        );
        Ok(Self { config, pool })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the value pool (Ω, ascending).
    pub fn pool(&self) -> &[f64] {
        &self.pool
    }

    /// Best VOUT dividers for `target` volts.
    pub fn vout(&self, target: f64) -> Result<Vec<PairCandidate>> {
        check_window("VOUT", target, VOUT_WINDOW)?;
        let divider = PairDivider::vout(target, self.config.reference, &self.config.constraints);
        Ok(self.run("VOUT", &divider))
    }

    /// Best VBAT_OV dividers for `target` volts, honoring never-exceed.
    pub fn overvoltage(&self, target: f64) -> Result<Vec<PairCandidate>> {
        check_window("VBAT_OV", target, VBAT_OV_WINDOW)?;
        let divider =
            PairDivider::overvoltage(target, self.config.reference, &self.config.constraints);
        Ok(self.run("VBAT_OV", &divider))
    }

    /// Best VBAT_OK strings for the PROG/HYST pair in `window`.
    pub fn battery_ok(&self, window: OkWindow) -> Result<Vec<OkCandidate>> {
        window.validate()?;
        let divider = OkDivider::new(window, self.config.reference, &self.config.constraints);
        Ok(self.run("VBAT_OK", &divider))
    }

    /// Run every sub-problem requested in `targets`.
    ///
    /// All targets are validated before the first search starts, so a
    /// configuration error never leaves partial results behind.
    pub fn solve(&self, targets: &Targets) -> Result<Solution> {
        targets.validate(&self.config.constraints)?;
        let window = targets.ok_window()?;
        let never_exceed = self.config.constraints.never_exceed_ov;

        let vout = targets
            .vout
            .iter()
            .map(|&target| -> Result<_> {
                Ok(Section {
                    problem: SubProblem::Vout(target),
                    candidates: self.vout(target)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let overvoltage = targets
            .vbat_ov
            .map(|target| -> Result<_> {
                Ok(Section {
                    problem: SubProblem::Overvoltage {
                        target,
                        never_exceed,
                    },
                    candidates: self.overvoltage(target)?,
                })
            })
            .transpose()?;

        let battery_ok = window
            .map(|window| -> Result<_> {
                Ok(Section {
                    problem: SubProblem::BatteryOk {
                        prog: window.prog,
                        hyst: window.hyst,
                    },
                    candidates: self.battery_ok(window)?,
                })
            })
            .transpose()?;

        Ok(Solution {
            tolerance: self.config.constraints.tolerance,
            vout,
            overvoltage,
            battery_ok,
        })
    }

    fn run<T: Topology>(&self, name: &str, topology: &T) -> Vec<T::Candidate> {
        let constraints = &self.config.constraints;
        let found = enumerate(&self.pool, constraints.rsum_max, topology);
        debug!(
            "{name}: {} tuples evaluated, {} passed filters",
            found.visited,
            found.candidates.len()
        );
        let ranked = rank(found.candidates, constraints.limit);
        if ranked.is_empty() {
            debug!("{name}: no candidates");
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divider::{Tap, ONE_PERCENT};
    use crate::error::DivcalcError;
    use crate::search::topology::Ranked;
    use crate::series::Series;

    fn assert_ranked<C: Ranked>(candidates: &[C]) {
        for pair in candidates.windows(2) {
            assert!(pair[0].score() <= pair[1].score());
        }
    }

    #[test]
    fn test_vout_3v3_e24() {
        let search = DividerSearch::new(SearchConfig::new()).unwrap();
        let candidates = search.vout(3.3).unwrap();
        assert_eq!(candidates.len(), 4);

        let best = &candidates[0];
        assert!((best.output.nominal - 3.3).abs() <= 0.1 * 3.3);
        assert!(candidates.iter().all(|c| c.rsum <= crate::DEFAULT_RSUM_MAX));
        assert_ranked(&candidates);

        for c in &candidates {
            assert!(search.pool().contains(&c.bottom));
            assert!(search.pool().contains(&c.top));
            assert!(c.output.one_percent.contains(c.output.nominal));
            assert!(c.output.at_tolerance.contains(c.output.nominal));
        }
    }

    #[test]
    fn test_ties_go_to_lower_rsum() {
        // Every equal pair hits 2.42 V exactly, so the cheapest strings rank first
        let search = DividerSearch::new(SearchConfig::new().with_limit(2)).unwrap();
        let candidates = search.vout(2.42).unwrap();
        assert_eq!(candidates[0].bottom, 1e6);
        assert_eq!(candidates[0].top, 1e6);
        assert_eq!(candidates[1].bottom, 1.1e6);
        assert_eq!(candidates[1].top, 1.1e6);
    }

    #[test]
    fn test_rsum_bound_respected() {
        let search = DividerSearch::new(
            SearchConfig::new()
                .with_series(Series::E96)
                .with_rsum_max(Some(5e6))
                .with_limit(50),
        )
        .unwrap();
        let candidates = search.vout(3.0).unwrap();
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|c| c.bottom + c.top <= 5e6));
        assert_ranked(&candidates);
    }

    #[test]
    fn test_never_exceed_ov_4v2() {
        let config = SearchConfig::new().with_never_exceed_ov(true).with_limit(20);
        let search = DividerSearch::new(config).unwrap();
        let candidates = search.overvoltage(4.2).unwrap();
        assert!(!candidates.is_empty());
        let reference = search.config().reference;
        for c in &candidates {
            let worst = Tap::OVERVOLTAGE.bounds(c.bottom, c.top, ONE_PERCENT, &reference);
            assert!(worst.max <= 4.2 + 1e-12);
            assert_eq!(worst, c.output.one_percent);
        }
        assert_ranked(&candidates);
    }

    #[test]
    fn test_ov_without_never_exceed_can_overshoot() {
        let search = DividerSearch::new(SearchConfig::new().with_limit(20)).unwrap();
        let candidates = search.overvoltage(4.2).unwrap();
        assert!(candidates.iter().any(|c| c.output.one_percent.max > 4.2));
        for c in &candidates {
            let nominal = Tap::OVERVOLTAGE.output(c.bottom, c.top, search.config().reference.typ);
            assert_eq!(nominal, c.output.nominal);
        }
    }

    #[test]
    fn test_battery_ok_window() {
        let search =
            DividerSearch::new(SearchConfig::new().with_decades(5, 6).with_limit(10)).unwrap();
        let window = OkWindow::new(3.5, 3.7).with_vbat_ov(Some(4.2));
        let candidates = search.battery_ok(window).unwrap();
        assert!(!candidates.is_empty());
        assert_ranked(&candidates);
        for c in &candidates {
            assert!(c.rsum <= crate::DEFAULT_RSUM_MAX);
            assert!(c.prog.nominal >= window.vbat_uv);
            assert!(c.hyst.nominal >= c.prog.nominal);
            assert!(c.hyst.nominal <= 4.2);
            assert!(c.prog.one_percent.contains(c.prog.nominal));
            assert!(c.hyst.one_percent.contains(c.hyst.nominal));
        }
    }

    #[test]
    fn test_wider_tolerance_widens_bands() {
        let narrow = DividerSearch::new(SearchConfig::new()).unwrap();
        let wide = DividerSearch::new(SearchConfig::new().with_tolerance(0.10)).unwrap();
        let a = narrow.vout(3.3).unwrap();
        let b = wide.vout(3.3).unwrap();
        // Tolerance does not change ranking, only the reported band
        assert_eq!(a.len(), b.len());
        for (a, b) in a.iter().zip(&b) {
            assert_eq!((a.bottom, a.top), (b.bottom, b.top));
            assert!(b.output.at_tolerance.encloses(&a.output.at_tolerance));
            assert!(b.output.at_tolerance.encloses(&b.output.one_percent));
        }
    }

    #[test]
    fn test_deterministic() {
        let config = SearchConfig::new().with_series(Series::E96).with_limit(8);
        let targets = Targets::new()
            .with_vout([2.5, 3.3])
            .with_vbat_ov(4.2)
            .with_vbat_ok(3.5, 3.7);
        let first = DividerSearch::new(config.clone()).unwrap().solve(&targets).unwrap();
        let second = DividerSearch::new(config).unwrap().solve(&targets).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_vout_does_not_abort_others() {
        // Only 1M..1.2M pairs fit, so VOUT tops out around 2.66 V
        let search = DividerSearch::new(SearchConfig::new().with_rsum_max(Some(2.2e6))).unwrap();
        let targets = Targets::new()
            .with_vout([5.0, 2.4])
            .with_vbat_ov(3.9)
            .with_vbat_ok(3.5, 3.7);
        let solution = search.solve(&targets).unwrap();

        assert_eq!(solution.sections(), 4);
        assert!(solution.vout[0].candidates.is_empty());
        assert!(!solution.vout[1].candidates.is_empty());
        assert!(!solution.overvoltage.as_ref().unwrap().candidates.is_empty());
        // No three megohm-range resistors fit under 2.2 MΩ
        assert!(solution.battery_ok.as_ref().unwrap().candidates.is_empty());
    }

    #[test]
    fn test_rsum_too_small_for_any_pair() {
        let search = DividerSearch::new(SearchConfig::new().with_rsum_max(Some(1.5e6))).unwrap();
        assert!(search.vout(3.3).unwrap().is_empty());
    }

    #[test]
    fn test_unbounded_rsum() {
        let search = DividerSearch::new(SearchConfig::new().with_rsum_max(None)).unwrap();
        let candidates = search.vout(5.5).unwrap();
        assert!(!candidates.is_empty());
    }

    #[test]
    fn test_config_error_before_search() {
        let err = DividerSearch::new(SearchConfig::new().with_decades(8, 6)).unwrap_err();
        assert!(matches!(err, DivcalcError::InvalidDecadeRange { .. }));

        let search = DividerSearch::new(SearchConfig::new()).unwrap();
        let targets = Targets::new().with_vout([3.3, 7.0]);
        let err = search.solve(&targets).unwrap_err();
        assert!(matches!(err, DivcalcError::InvalidTarget { .. }));

        assert!(search.vout(1.0).is_err());
        assert!(search.overvoltage(6.0).is_err());
        assert!(search.battery_ok(OkWindow::new(3.7, 3.5)).is_err());
    }

    #[test]
    fn test_solve_section_problems() {
        let search = DividerSearch::new(SearchConfig::new().with_never_exceed_ov(true)).unwrap();
        let targets = Targets::new().with_vout([3.3]).with_vbat_ov(4.2);
        let solution = search.solve(&targets).unwrap();
        assert_eq!(solution.vout[0].problem, SubProblem::Vout(3.3));
        assert_eq!(
            solution.overvoltage.unwrap().problem,
            SubProblem::Overvoltage {
                target: 4.2,
                never_exceed: true
            }
        );
        assert!(solution.battery_ok.is_none());
    }
}
