//! # exam_test_gen
//!
//! Builds printable exam tests by drawing problems at random from a problem
//! bank until the draw satisfies aggregate constraints.
//!
//! ## How it works
//!
//! 1. Load a [`Bank`] from a TeX or JSON file with [`load_bank`].
//! 2. Describe the test with a [`ConstraintSet`]: how many problems, how many
//!    per topic, and the allowed total difficulty.
//! 3. Call [`generate_test`]. The engine shuffles the whole bank, takes the
//!    first `size` problems, and keeps them only if every constraint holds.
//!    Otherwise it reshuffles. The accepted shuffle order is the problem order
//!    on the test.
//! 4. Render the result with a [`Header`] and a [`ProblemLayout`]
//!    ([`SimpleLayout`] or [`FancyLayout`]) via [`render_document`].
//!
//! ## Termination
//!
//! Rejection sampling only stops when it finds a valid draw. If no valid draw
//! exists, [`AttemptLimit::Unbounded`] never returns; use
//! [`AttemptLimit::AtMost`] to get [`TestGenError::Infeasible`] instead.
//!
//! ## Quick start
//!
//! ```rust
//! use exam_test_gen::{
//!     generate_test, render_document, AttemptLimit, Bank, ConstraintSet, Header, Problem,
//!     SimpleLayout, TestRequest,
//! };
//!
//! let mut problems: Vec<Problem> = (0..5)
//!     .map(|i| Problem::new("add", 3, format!("${i} + 1$"), format!("${}$", i + 1)))
//!     .collect();
//! problems.extend((0..5).map(|i| Problem::new("sub", 4, format!("${i} - 1$"), "")));
//! let bank = Bank::new(problems);
//!
//! let constraints = ConstraintSet {
//!     size: 4,
//!     min_topic_count: 1,
//!     max_topic_count: 3,
//!     min_difficulty: 13,
//!     max_difficulty: 15,
//! };
//! let test = generate_test(
//!     &bank,
//!     TestRequest::new(constraints).with_seed(42).with_attempt_limit(AttemptLimit::AtMost(10_000)),
//! )
//! .unwrap();
//! assert_eq!(test.problems.len(), 4);
//!
//! let mut header = Header::new("tex_header.tex", "content_header.tex");
//! header.add_command("testtitle", "Quiz 1").unwrap();
//! let tex = render_document(&header, &SimpleLayout, &test.problems);
//! assert!(tex.ends_with("\\end{document}"));
//! ```
//!
//! ## Demo
//!
//! A longer walkthrough (two seeds, both layouts, an infeasible request) lives
//! in `demos/demo.rs`. It is registered as a Cargo example, so
//! `cargo run --example demo` runs it.

pub mod test_engine;

// Convenience re-exports so callers can use `exam_test_gen::generate_test`
// directly without reaching into `test_engine::`.
pub use test_engine::{
    generate_test, is_valid, load_bank, render_document, AttemptLimit, Bank, ConstraintSet,
    FancyLayout, GeneratedTest, Header, LayoutStyle, Problem, ProblemLayout, ProblemSelector,
    RejectionSampler, Result, Selection, SimpleLayout, TestConfig, TestGenError, TestRequest,
};
