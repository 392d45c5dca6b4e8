//! Ranking and truncation of search survivors.

use super::topology::Ranked;

/// Sort candidates by score, ties broken by lower total resistance, and keep
/// the best `limit`.
///
/// The sort is stable, so exact ties keep enumeration order.
pub fn rank<C: Ranked>(mut candidates: Vec<C>, limit: usize) -> Vec<C> {
    candidates.sort_by(|a, b| {
        a.score()
            .total_cmp(&b.score())
            .then_with(|| a.rsum().total_cmp(&b.rsum()))
    });
    candidates.truncate(limit);
    candidates
}
