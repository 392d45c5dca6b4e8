//! Candidate search and ranking.
//!
//! Each sub-problem (VOUT, VBAT_OV, VBAT_OK) is a [`Topology`] handed to the
//! same enumeration loop:
//!
//! 1. Walk every tuple of the value pool whose sum stays under `rsum_max`
//! 2. Evaluate the tuple's trip voltage(s) and drop it if it strays outside
//!    the deviation band or breaks a hard constraint
//! 3. Sort survivors by deviation, then total resistance, and keep `limit`
//!
//! Sub-problems share nothing but the immutable pool, so an empty result for
//! one never affects another.

use crate::divider::Bounds;

mod config;
mod engine;
mod enumerate;
mod rank;
mod topology;

pub use config::{Constraints, OkWindow, SearchConfig, Targets};
pub use engine::{DividerSearch, Section, Solution, SubProblem};
pub use enumerate::{enumerate, Enumeration};
pub use rank::rank;
pub use topology::{OkCandidate, OkDivider, PairCandidate, PairDivider, Ranked, Topology};

/// Default relative deviation band: candidates further than 10 % from
/// target are never kept.
pub const DEFAULT_DEVIATION_BAND: f64 = 0.10;

/// Slack on the never-exceed comparison so that a worst case landing exactly
/// on the target is kept.
pub const NEVER_EXCEED_SLACK: f64 = 1e-12;

/// Datasheet window for VOUT targets (V).
pub const VOUT_WINDOW: Bounds = Bounds { min: 2.0, max: 5.5 };

/// Datasheet window for VBAT_OV targets (V).
pub const VBAT_OV_WINDOW: Bounds = Bounds { min: 2.2, max: 5.5 };
