//! Rejection sampling over shuffles of the bank.
//!
//! Each attempt shuffles the whole bank, takes the first `size` problems in
//! shuffled order, and keeps them if they pass [`validator::is_valid`]. The
//! shuffled order becomes the display order of the test.
//!
//! ## Termination
//!
//! With [`AttemptLimit::Unbounded`] the loop only ends on success, so an
//! infeasible constraint set never returns. [`AttemptLimit::AtMost`] turns that
//! into [`TestGenError::Infeasible`] once the budget is spent.

use log::{debug, info, warn};
use rand::{Rng, RngCore};

use crate::test_engine::{
    error::{Result, TestGenError},
    models::{AttemptLimit, Bank, ConstraintSet, Problem},
    validator::{self, check_constraints},
};

/// Rejected attempts between progress log lines.
const REPORT_EVERY: u64 = 100_000;

/// An accepted test plus the number of candidates it took to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub problems: Vec<Problem>,
    pub attempts: u64,
}

/// Strategy for choosing the problems of one test from a bank.
pub trait ProblemSelector {
    fn select(&self, bank: &Bank, rng: &mut dyn RngCore) -> Result<Selection>;
}

/// Shuffle-and-validate selection, the default strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionSampler {
    pub constraints: ConstraintSet,
    pub limit: AttemptLimit,
}

impl RejectionSampler {
    pub fn new(constraints: ConstraintSet, limit: AttemptLimit) -> Self {
        RejectionSampler { constraints, limit }
    }
}

impl ProblemSelector for RejectionSampler {
    fn select(&self, bank: &Bank, rng: &mut dyn RngCore) -> Result<Selection> {
        select(bank, &self.constraints, rng, self.limit)
    }
}

/// Fisher-Yates shuffle of `order` in place.
fn shuffle<R: Rng + ?Sized>(order: &mut [usize], rng: &mut R) {
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
}

/// Draw random candidates from `bank` until one satisfies `constraints`.
///
/// Malformed constraint sets fail before the first draw. The permutation is
/// kept between attempts and reshuffled in place, so every attempt is a fresh
/// uniform permutation of the whole bank.
pub fn select<R: Rng + ?Sized>(
    bank: &Bank,
    constraints: &ConstraintSet,
    rng: &mut R,
    limit: AttemptLimit,
) -> Result<Selection> {
    check_constraints(bank, constraints)?;

    let topics = bank.topics();
    let problems = bank.problems();
    let mut order: Vec<usize> = (0..problems.len()).collect();
    let mut rejected: u64 = 0;

    debug!(
        "sampling {} of {} problems across {} topics ({constraints}, {limit})",
        constraints.size,
        problems.len(),
        topics.len(),
    );

    loop {
        if limit.exhausted(rejected) {
            warn!("gave up after {rejected} rejected candidates ({constraints})");
            return Err(TestGenError::Infeasible { attempts: rejected });
        }

        shuffle(&mut order, rng);
        let candidate = order[..constraints.size].iter().map(|&i| &problems[i]);

        if validator::fits(candidate.clone(), &topics, constraints) {
            let attempts = rejected + 1;
            info!("accepted candidate on attempt {attempts}");
            return Ok(Selection {
                problems: candidate.cloned().collect(),
                attempts,
            });
        }

        rejected += 1;
        if rejected % REPORT_EVERY == 0 {
            debug!("{rejected} candidates rejected so far");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn add_sub_bank() -> Bank {
        let mut problems: Vec<Problem> = (0..5)
            .map(|i| Problem::new("add", 3, format!("add #{i}"), ""))
            .collect();
        problems.extend((0..5).map(|i| Problem::new("sub", 4, format!("sub #{i}"), "")));
        Bank::new(problems)
    }

    fn example_constraints() -> ConstraintSet {
        ConstraintSet {
            size: 4,
            min_topic_count: 1,
            max_topic_count: 3,
            min_difficulty: 13,
            max_difficulty: 15,
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut order: Vec<usize> = (0..50).collect();
        shuffle(&mut order, &mut rng);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(order, sorted, "50 elements should not survive a shuffle unchanged");
    }

    #[test]
    fn accepted_test_satisfies_every_constraint() {
        let bank = add_sub_bank();
        let c = example_constraints();
        for seed in 0..25u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sel = select(&bank, &c, &mut rng, AttemptLimit::Unbounded).unwrap();
            assert_eq!(sel.problems.len(), c.size);
            assert!(validator::is_valid(&sel.problems, &bank.topics(), &c), "seed {seed}");
            assert!(sel.attempts >= 1);
        }
    }

    #[test]
    fn selection_draws_without_replacement() {
        let bank = add_sub_bank();
        let mut rng = StdRng::seed_from_u64(7);
        let sel = select(&bank, &example_constraints(), &mut rng, AttemptLimit::AtMost(10_000)).unwrap();
        let distinct: HashSet<&str> = sel.problems.iter().map(|p| p.question.as_str()).collect();
        assert_eq!(distinct.len(), sel.problems.len());
    }

    #[test]
    fn same_seed_gives_same_order() {
        let bank = add_sub_bank();
        let c = example_constraints();
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            select(&bank, &c, &mut rng, AttemptLimit::Unbounded).unwrap()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn infeasible_quota_exhausts_budget() {
        let bank = add_sub_bank();
        let c = ConstraintSet { min_topic_count: 3, max_topic_count: 3, ..example_constraints() };
        let mut rng = StdRng::seed_from_u64(1);
        match select(&bank, &c, &mut rng, AttemptLimit::AtMost(500)) {
            Err(TestGenError::Infeasible { attempts }) => assert_eq!(attempts, 500),
            other => panic!("expected Infeasible, got {other:?}"),
        }
    }

    #[test]
    fn zero_budget_fails_without_drawing() {
        let bank = add_sub_bank();
        let mut rng = StdRng::seed_from_u64(1);
        let err = select(&bank, &example_constraints(), &mut rng, AttemptLimit::AtMost(0)).unwrap_err();
        assert!(matches!(err, TestGenError::Infeasible { attempts: 0 }));
    }

    #[test]
    fn oversized_request_fails_fast() {
        let bank = add_sub_bank();
        let c = ConstraintSet { size: 11, ..example_constraints() };
        let mut rng = StdRng::seed_from_u64(1);
        let err = select(&bank, &c, &mut rng, AttemptLimit::Unbounded).unwrap_err();
        assert!(matches!(err, TestGenError::InvalidConstraints(_)));
    }

    #[test]
    fn empty_bank_with_zero_size_returns_empty_test() {
        let c = ConstraintSet {
            size: 0,
            min_topic_count: 0,
            max_topic_count: 0,
            min_difficulty: 0,
            max_difficulty: 0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let sel = select(&Bank::default(), &c, &mut rng, AttemptLimit::Unbounded).unwrap();
        assert!(sel.problems.is_empty());
        assert_eq!(sel.attempts, 1);
    }

    #[test]
    fn selector_trait_object_uses_injected_rng() {
        let bank = add_sub_bank();
        let sampler: Box<dyn ProblemSelector> =
            Box::new(RejectionSampler::new(example_constraints(), AttemptLimit::AtMost(10_000)));
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        assert_eq!(sampler.select(&bank, &mut a).unwrap(), sampler.select(&bank, &mut b).unwrap());
    }
}
