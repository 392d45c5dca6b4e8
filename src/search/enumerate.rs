//! Exhaustive tuple enumeration over the value pool.
//!
//! Tuples are visited in lexicographic order of the (ascending) pool, bottom
//! resistor outermost. Because the pool is sorted, the inner loop can stop
//! as soon as the running sum plus the cheapest completion exceeds
//! `rsum_max`; no other pruning is done.

use super::topology::Topology;

/// Survivors of one enumeration plus the number of tuples evaluated.
#[derive(Debug, Clone)]
pub struct Enumeration<C> {
    pub candidates: Vec<C>,
    pub visited: usize,
}

/// Enumerate every `T::ARITY`-tuple of `pool` with sum `<= rsum_max` and
/// collect the ones `topology` accepts, in visiting order.
///
/// `pool` must be sorted ascending.
pub fn enumerate<T: Topology>(
    pool: &[f64],
    rsum_max: Option<f64>,
    topology: &T,
) -> Enumeration<T::Candidate> {
    debug_assert!(pool.windows(2).all(|w| w[0] <= w[1]), "pool must be sorted");

    let Some(&floor) = pool.first() else {
        return Enumeration {
            candidates: Vec::new(),
            visited: 0,
        };
    };

    let mut walker = Walker {
        pool,
        floor,
        rsum_max: rsum_max.unwrap_or(f64::INFINITY),
        topology,
        tuple: Vec::with_capacity(T::ARITY),
        candidates: Vec::new(),
        visited: 0,
    };
    walker.walk(0.0);

    Enumeration {
        candidates: walker.candidates,
        visited: walker.visited,
    }
}

struct Walker<'a, T: Topology> {
    pool: &'a [f64],
    /// Smallest pool value
    floor: f64,
    rsum_max: f64,
    topology: &'a T,
    tuple: Vec<f64>,
    candidates: Vec<T::Candidate>,
    visited: usize,
}

impl<T: Topology> Walker<'_, T> {
    fn walk(&mut self, sum: f64) {
        let remaining = T::ARITY - self.tuple.len();
        if remaining == 0 {
            self.visited += 1;
            if let Some(candidate) = self.topology.evaluate(&self.tuple, sum) {
                self.candidates.push(candidate);
            }
            return;
        }

        let pool = self.pool;
        let reserve = self.floor * (remaining - 1) as f64;
        for &value in pool {
            let running = sum + value;
            if running + reserve > self.rsum_max {
                break;
            }
            self.tuple.push(value);
            self.walk(running);
            self.tuple.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::topology::Ranked;

    /// Accepts every tuple and records it.
    struct Recorder<const N: usize>;

    #[derive(Debug, Clone, PartialEq)]
    struct Tuple {
        values: Vec<f64>,
        rsum: f64,
    }

    impl Ranked for Tuple {
        fn score(&self) -> f64 {
            0.0
        }

        fn rsum(&self) -> f64 {
            self.rsum
        }
    }

    impl<const N: usize> Topology for Recorder<N> {
        type Candidate = Tuple;

        const ARITY: usize = N;

        fn evaluate(&self, resistors: &[f64], rsum: f64) -> Option<Tuple> {
            Some(Tuple {
                values: resistors.to_vec(),
                rsum,
            })
        }
    }

    #[test]
    fn test_unbounded_pairs_are_full_product() {
        let pool = [1.0, 2.0, 3.0];
        let result = enumerate(&pool, None, &Recorder::<2>);
        assert_eq!(result.visited, 9);
        assert_eq!(result.candidates.len(), 9);
        assert_eq!(result.candidates[0].values, vec![1.0, 1.0]);
        assert_eq!(result.candidates[1].values, vec![1.0, 2.0]);
        assert_eq!(result.candidates[3].values, vec![2.0, 1.0]);
        assert_eq!(result.candidates[8].values, vec![3.0, 3.0]);
    }

    #[test]
    fn test_rsum_bound_inclusive() {
        let pool = [1.0, 2.0, 3.0];
        let result = enumerate(&pool, Some(4.0), &Recorder::<2>);
        let tuples: Vec<_> = result.candidates.iter().map(|t| t.values.clone()).collect();
        assert_eq!(
            tuples,
            vec![
                vec![1.0, 1.0],
                vec![1.0, 2.0],
                vec![1.0, 3.0],
                vec![2.0, 1.0],
                vec![2.0, 2.0],
                vec![3.0, 1.0],
            ]
        );
        assert!(result.candidates.iter().all(|t| t.rsum <= 4.0));
    }

    #[test]
    fn test_triples_respect_bound() {
        let pool = [1.0, 2.0, 5.0, 10.0];
        let result = enumerate(&pool, Some(8.0), &Recorder::<3>);
        assert!(!result.candidates.is_empty());
        for t in &result.candidates {
            assert_eq!(t.values.len(), 3);
            assert!(t.rsum <= 8.0);
            assert_eq!(t.rsum, t.values.iter().sum::<f64>());
        }
        // (5, 2, 1) fits, (5, 2, 2) does not
        assert!(result.candidates.iter().any(|t| t.values == vec![5.0, 2.0, 1.0]));
        assert!(!result.candidates.iter().any(|t| t.values == vec![5.0, 2.0, 2.0]));
        assert_eq!(result.visited, result.candidates.len());
    }

    #[test]
    fn test_unbounded_triples_count() {
        let pool = [1.0, 2.0, 3.0, 4.0];
        let result = enumerate(&pool, None, &Recorder::<3>);
        assert_eq!(result.visited, 64);
    }

    #[test]
    fn test_bound_below_smallest_tuple() {
        let pool = [1.0, 2.0];
        let result = enumerate(&pool, Some(1.5), &Recorder::<2>);
        assert!(result.candidates.is_empty());
        assert_eq!(result.visited, 0);
    }

    #[test]
    fn test_empty_pool() {
        let result = enumerate(&[], None, &Recorder::<2>);
        assert!(result.candidates.is_empty());
        assert_eq!(result.visited, 0);
    }
}
