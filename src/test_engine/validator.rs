//! Constraint checks on candidate tests.
//!
//! [`is_valid`] is the pure per-candidate check the sampler runs on every
//! shuffle. [`check_constraints`] rejects malformed constraint sets before any
//! sampling happens, and [`quick_infeasibility`] catches constraint sets that
//! no subset of the bank could ever satisfy.

use std::collections::{BTreeMap, BTreeSet};

use crate::test_engine::{
    error::{Result, TestGenError},
    models::{Bank, ConstraintSet, Problem},
};

/// Does `subset` satisfy `constraints`?
///
/// Topic counts are checked for every topic in `topics` (the bank's full topic
/// set), so a topic missing from `subset` counts as zero and fails whenever
/// `min_topic_count > 0`.
pub fn is_valid(subset: &[Problem], topics: &BTreeSet<String>, constraints: &ConstraintSet) -> bool {
    fits(subset, topics, constraints)
}

/// [`is_valid`] over borrowed problems, so the sampler can check a candidate
/// without cloning it.
pub(crate) fn fits<'a, I>(subset: I, topics: &BTreeSet<String>, constraints: &ConstraintSet) -> bool
where
    I: IntoIterator<Item = &'a Problem> + Clone,
{
    let difficulty: i64 = subset.clone().into_iter().map(|p| i64::from(p.difficulty)).sum();
    if difficulty < constraints.min_difficulty || difficulty > constraints.max_difficulty {
        return false;
    }

    let mut counts: BTreeMap<&str, usize> = topics.iter().map(|t| (t.as_str(), 0)).collect();
    for p in subset.into_iter() {
        if let Some(n) = counts.get_mut(p.topic.as_str()) {
            *n += 1;
        }
    }
    counts
        .values()
        .all(|&n| n >= constraints.min_topic_count && n <= constraints.max_topic_count)
}

/// Reject constraint sets that are malformed on their own or too large for `bank`.
pub fn check_constraints(bank: &Bank, constraints: &ConstraintSet) -> Result<()> {
    if constraints.size > bank.len() {
        return Err(TestGenError::InvalidConstraints(format!(
            "test size {} exceeds bank size {}",
            constraints.size,
            bank.len()
        )));
    }
    if constraints.max_topic_count < constraints.min_topic_count {
        return Err(TestGenError::InvalidConstraints(format!(
            "max topic count {} is below min topic count {}",
            constraints.max_topic_count, constraints.min_topic_count
        )));
    }
    if constraints.max_difficulty < constraints.min_difficulty {
        return Err(TestGenError::InvalidConstraints(format!(
            "max difficulty {} is below min difficulty {}",
            constraints.max_difficulty, constraints.min_difficulty
        )));
    }
    Ok(())
}

/// Necessary-condition check: fails only when no subset can possibly pass.
///
/// Passing this check does not prove a valid test exists. The sampler never
/// calls it; callers that prefer an early error over a long search do.
pub fn quick_infeasibility(bank: &Bank, constraints: &ConstraintSet) -> Result<()> {
    check_constraints(bank, constraints)?;
    let c = constraints;

    let mut available: BTreeMap<&str, usize> = BTreeMap::new();
    for p in bank.problems() {
        *available.entry(p.topic.as_str()).or_default() += 1;
    }

    if let Some((topic, have)) = available.iter().find(|&(_, &n)| n < c.min_topic_count) {
        return Err(TestGenError::Unsatisfiable(format!(
            "topic '{topic}' has {have} problems but at least {} are required",
            c.min_topic_count
        )));
    }

    let floor: usize = available.len() * c.min_topic_count;
    if floor > c.size {
        return Err(TestGenError::Unsatisfiable(format!(
            "{} topics x {} minimum = {floor} problems, more than the test size {}",
            available.len(),
            c.min_topic_count,
            c.size
        )));
    }
    let ceiling: usize = available.values().map(|&n| n.min(c.max_topic_count)).sum();
    if ceiling < c.size {
        return Err(TestGenError::Unsatisfiable(format!(
            "at most {ceiling} problems can be drawn within the per-topic maximum of {}, \
             fewer than the test size {}",
            c.max_topic_count, c.size
        )));
    }

    let mut difficulties: Vec<i64> = bank.problems().iter().map(|p| i64::from(p.difficulty)).collect();
    difficulties.sort_unstable();
    let lightest: i64 = difficulties.iter().take(c.size).sum();
    let heaviest: i64 = difficulties.iter().rev().take(c.size).sum();
    if lightest > c.max_difficulty {
        return Err(TestGenError::Unsatisfiable(format!(
            "the {} easiest problems already total {lightest}, above the maximum {}",
            c.size, c.max_difficulty
        )));
    }
    if heaviest < c.min_difficulty {
        return Err(TestGenError::Unsatisfiable(format!(
            "the {} hardest problems only total {heaviest}, below the minimum {}",
            c.size, c.min_difficulty
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(topic: &str, difficulty: i32) -> Problem {
        Problem::new(topic, difficulty, format!("{topic} {difficulty}"), "")
    }

    fn add_sub_bank() -> Bank {
        let mut problems: Vec<Problem> = (0..5).map(|_| p("add", 3)).collect();
        problems.extend((0..5).map(|_| p("sub", 4)));
        Bank::new(problems)
    }

    fn limits(size: usize, topic: (usize, usize), difficulty: (i64, i64)) -> ConstraintSet {
        ConstraintSet {
            size,
            min_topic_count: topic.0,
            max_topic_count: topic.1,
            min_difficulty: difficulty.0,
            max_difficulty: difficulty.1,
        }
    }

    #[test]
    fn balanced_subset_passes() {
        let bank = add_sub_bank();
        let subset = vec![p("add", 3), p("sub", 4), p("add", 3), p("sub", 4)];
        assert!(is_valid(&subset, &bank.topics(), &limits(4, (1, 3), (13, 15))));
    }

    #[test]
    fn difficulty_bounds_are_inclusive() {
        let topics = add_sub_bank().topics();
        let subset = vec![p("add", 3), p("sub", 4), p("add", 3), p("sub", 4)];
        assert!(is_valid(&subset, &topics, &limits(4, (0, 4), (14, 14))));
        assert!(!is_valid(&subset, &topics, &limits(4, (0, 4), (15, 20))));
        assert!(!is_valid(&subset, &topics, &limits(4, (0, 4), (0, 13))));
    }

    #[test]
    fn topic_absent_from_subset_counts_as_zero() {
        let topics = add_sub_bank().topics();
        let only_add = vec![p("add", 3), p("add", 3), p("add", 3), p("add", 3)];
        assert!(!is_valid(&only_add, &topics, &limits(4, (1, 4), (0, 100))));
        assert!(is_valid(&only_add, &topics, &limits(4, (0, 4), (0, 100))));
    }

    #[test]
    fn topic_over_maximum_fails() {
        let topics = add_sub_bank().topics();
        let heavy_sub = vec![p("add", 3), p("sub", 4), p("sub", 4), p("sub", 4)];
        assert!(!is_valid(&heavy_sub, &topics, &limits(4, (1, 2), (0, 100))));
    }

    #[test]
    fn validation_is_repeatable() {
        let topics = add_sub_bank().topics();
        let subset = vec![p("add", 3), p("sub", 4), p("sub", 4), p("add", 3)];
        let c = limits(4, (1, 3), (13, 15));
        assert_eq!(is_valid(&subset, &topics, &c), is_valid(&subset, &topics, &c));
    }

    #[test]
    fn empty_subset_with_no_topics_passes_zero_window() {
        assert!(is_valid(&[], &BTreeSet::new(), &limits(0, (0, 0), (0, 0))));
    }

    #[test]
    fn every_size_four_subset_fails_impossible_quota() {
        // 3 + 3 problems can never fit in a test of 4.
        let bank = add_sub_bank();
        let topics = bank.topics();
        let c = limits(4, (3, 3), (0, 100));
        let problems = bank.problems();
        for mask in 0u32..(1 << problems.len()) {
            if mask.count_ones() != 4 {
                continue;
            }
            let subset: Vec<Problem> = (0..problems.len())
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| problems[i].clone())
                .collect();
            assert!(!is_valid(&subset, &topics, &c), "mask {mask:b} unexpectedly valid");
        }
    }

    #[test]
    fn oversized_test_is_rejected() {
        let err = check_constraints(&add_sub_bank(), &limits(11, (0, 11), (0, 100))).unwrap_err();
        assert!(matches!(err, TestGenError::InvalidConstraints(_)), "{err}");
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let bank = add_sub_bank();
        assert!(check_constraints(&bank, &limits(4, (3, 1), (0, 100))).is_err());
        assert!(check_constraints(&bank, &limits(4, (0, 4), (20, 10))).is_err());
        assert!(check_constraints(&bank, &limits(4, (1, 3), (13, 15))).is_ok());
    }

    #[test]
    fn quick_check_flags_quota_overflow() {
        let err = quick_infeasibility(&add_sub_bank(), &limits(4, (3, 3), (0, 100))).unwrap_err();
        assert!(matches!(err, TestGenError::Unsatisfiable(_)), "{err}");
    }

    #[test]
    fn quick_check_flags_difficulty_window() {
        // Lightest four: 3+3+3+3 = 12; heaviest four: 16.
        let bank = add_sub_bank();
        assert!(quick_infeasibility(&bank, &limits(4, (0, 4), (17, 30))).is_err());
        assert!(quick_infeasibility(&bank, &limits(4, (0, 4), (0, 11))).is_err());
        assert!(quick_infeasibility(&bank, &limits(4, (0, 4), (12, 12))).is_ok());
    }

    #[test]
    fn quick_check_flags_topic_shortage() {
        let bank = Bank::new(vec![p("add", 1), p("add", 1), p("sub", 1)]);
        assert!(quick_infeasibility(&bank, &limits(3, (2, 2), (0, 10))).is_err());
    }

    #[test]
    fn quick_check_flags_per_topic_ceiling() {
        // Floor is 0, but a maximum of 0 per topic leaves nothing to draw.
        let bank = Bank::new(vec![p("a", 1), p("b", 1)]);
        let err = quick_infeasibility(&bank, &limits(2, (0, 0), (0, 100))).unwrap_err();
        assert!(matches!(err, TestGenError::Unsatisfiable(_)), "{err}");
        assert!(err.to_string().contains("at most 0 problems"), "{err}");
        assert!(quick_infeasibility(&bank, &limits(2, (0, 1), (0, 100))).is_ok());
    }

    #[test]
    fn quick_check_passes_feasible_example() {
        assert!(quick_infeasibility(&add_sub_bank(), &limits(4, (1, 3), (13, 15))).is_ok());
    }
}
