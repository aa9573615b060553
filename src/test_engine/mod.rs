//! Test-assembly engine: bank loading, constrained selection, and TeX output.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: problems, bank, constraints, request/response structs |
//! | `error`     | `TestGenError` and the crate `Result` alias |
//! | `validator` | Pure constraint check on a candidate, plus up-front constraint checks |
//! | `sampler`   | Shuffle-and-validate rejection sampling with an attempt budget |
//! | `generator` | Single entry point `generate_test()`, seeds the RNG and samples |
//! | `bank`      | TeX and JSON problem-bank parsers |
//! | `layout`    | `ProblemLayout` and its two styles (simple, fancy) |
//! | `document`  | Header variables and whole-document rendering |
//! | `config`    | JSON run configuration with simple/fancy presets |

pub mod bank;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod layout;
pub mod models;
pub mod sampler;
pub mod validator;

// Re-export the public API surface so callers can use
// `test_engine::generate_test` without reaching into sub-modules.
pub use bank::load_bank;
pub use config::TestConfig;
pub use document::{render_document, Header};
pub use error::{Result, TestGenError};
pub use generator::generate_test;
pub use layout::{FancyLayout, LayoutStyle, ProblemLayout, SimpleLayout};
pub use models::{AttemptLimit, Bank, ConstraintSet, GeneratedTest, Problem, TestRequest};
pub use sampler::{ProblemSelector, RejectionSampler, Selection};
pub use validator::is_valid;
