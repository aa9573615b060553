use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Problem records
// ---------------------------------------------------------------------------

/// One exam problem as read from the bank. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub topic: String,
    pub difficulty: i32,
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl Problem {
    pub fn new(
        topic: impl Into<String>, difficulty: i32,
        question: impl Into<String>, answer: impl Into<String>,
    ) -> Self {
        Problem {
            topic: topic.into(),
            difficulty,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} / {}] {}", self.topic, self.difficulty, self.question.trim())
    }
}

/// The full, ordered collection of problems available for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bank {
    problems: Vec<Problem>,
}

impl Bank {
    pub fn new(problems: Vec<Problem>) -> Self {
        Bank { problems }
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Distinct topics across the whole bank, sorted.
    pub fn topics(&self) -> BTreeSet<String> {
        self.problems.iter().map(|p| p.topic.clone()).collect()
    }
}

impl From<Vec<Problem>> for Bank {
    fn from(problems: Vec<Problem>) -> Self {
        Bank::new(problems)
    }
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Aggregate limits a generated test must satisfy. All ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSet {
    /// Number of problems on the test.
    pub size: usize,
    pub min_topic_count: usize,
    pub max_topic_count: usize,
    pub min_difficulty: i64,
    pub max_difficulty: i64,
}

impl Default for ConstraintSet {
    /// 20 problems, 3-7 per topic, total difficulty 65-75.
    fn default() -> Self {
        ConstraintSet {
            size: 20,
            min_topic_count: 3,
            max_topic_count: 7,
            min_difficulty: 65,
            max_difficulty: 75,
        }
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size={} topics={}..={} difficulty={}..={}",
            self.size, self.min_topic_count, self.max_topic_count,
            self.min_difficulty, self.max_difficulty,
        )
    }
}

/// How many candidates the sampler may reject before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptLimit {
    /// Retry forever. Never returns if the constraints are infeasible.
    #[default]
    Unbounded,
    /// Fail with `Infeasible` after this many rejected candidates.
    AtMost(u64),
}

impl AttemptLimit {
    /// `true` once `attempts` candidates have been rejected and no more are allowed.
    pub fn exhausted(self, attempts: u64) -> bool {
        match self {
            AttemptLimit::Unbounded => false,
            AttemptLimit::AtMost(max) => attempts >= max,
        }
    }
}

impl From<Option<u64>> for AttemptLimit {
    fn from(max: Option<u64>) -> Self {
        max.map_or(AttemptLimit::Unbounded, AttemptLimit::AtMost)
    }
}

impl fmt::Display for AttemptLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptLimit::Unbounded  => write!(f, "unbounded"),
            AttemptLimit::AtMost(n)  => write!(f, "at most {n} attempts"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRequest {
    pub constraints: ConstraintSet,
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub attempt_limit: AttemptLimit,
}

impl TestRequest {
    /// Entropy-seeded, unbounded request for `constraints`.
    pub fn new(constraints: ConstraintSet) -> Self {
        TestRequest {
            constraints,
            rng_seed: None,
            attempt_limit: AttemptLimit::Unbounded,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_attempt_limit(mut self, limit: impl Into<AttemptLimit>) -> Self {
        self.attempt_limit = limit.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTest {
    pub test_id: String,
    /// Problems in display order.
    pub problems: Vec<Problem>,
    /// Candidates drawn, including the accepted one.
    pub attempts: u64,
}

impl GeneratedTest {
    pub fn total_difficulty(&self) -> i64 {
        self.problems.iter().map(|p| i64::from(p.difficulty)).sum()
    }
}
