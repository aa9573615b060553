//! Run configuration: where the bank lives, where the test goes, how it looks,
//! and which constraints it must satisfy.
//!
//! Configs are JSON files; any field left out takes its value from the preset
//! for the chosen layout (see [`TestConfig::simple`] and [`TestConfig::fancy`]).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::test_engine::{
    document::Header,
    error::{Result, TestGenError},
    layout::LayoutStyle,
    models::{AttemptLimit, ConstraintSet, TestRequest},
};

/// Default sampling budget for configured runs.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000_000;

/// Header variable the fancy layout uses for the test size.
pub const NUM_PROBLEMS_VAR: &str = "numproblems";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub layout: LayoutStyle,
    pub bank: PathBuf,
    pub output: PathBuf,
    pub tex_header: String,
    pub content_header: String,
    /// Emitted as `\newcommand{\<name>}{<value>}` in the header.
    pub variables: BTreeMap<String, String>,
    pub constraints: ConstraintSet,
    /// `None` (JSON `null`) samples until a valid test turns up.
    pub max_attempts: Option<u64>,
    pub rng_seed: Option<u64>,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig::simple()
    }
}

fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

impl TestConfig {
    /// Plain numbered list with a single title.
    pub fn simple() -> Self {
        TestConfig {
            layout: LayoutStyle::Simple,
            bank: PathBuf::from("arithmetic_problems.tex"),
            output: PathBuf::from("simple_test.tex"),
            tex_header: "simple_tex_header.tex".into(),
            content_header: "simple_content_header.tex".into(),
            variables: vars(&[("testtitle", "Arithmetic Test")]),
            constraints: ConstraintSet::default(),
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            rng_seed: None,
        }
    }

    /// Two problems per page with class, term and form details in the header.
    pub fn fancy() -> Self {
        TestConfig {
            layout: LayoutStyle::Fancy,
            output: PathBuf::from("fancy_test.tex"),
            tex_header: "fancy_tex_header.tex".into(),
            content_header: "fancy_content_header.tex".into(),
            variables: vars(&[
                ("class", "Arithmetic"),
                ("term", "Fall 2025"),
                ("examno", "925"),
                ("dayeve", "Day"),
                ("testtitle", "Final Exam"),
                ("formletter", "A"),
            ]),
            ..TestConfig::simple()
        }
    }

    pub fn preset(layout: LayoutStyle) -> Self {
        match layout {
            LayoutStyle::Simple => TestConfig::simple(),
            LayoutStyle::Fancy  => TestConfig::fancy(),
        }
    }

    /// Parse a JSON config. Missing fields fall back to the preset named by
    /// `layout` (or the simple preset when `layout` is absent too).
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(text)?;
        let layout = match raw.get("layout") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => LayoutStyle::default(),
        };
        let mut merged = serde_json::to_value(TestConfig::preset(layout))?;
        if let (Some(base), Some(overrides)) = (merged.as_object_mut(), raw.as_object()) {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        } else {
            return Err(TestGenError::Config("config must be a JSON object".into()));
        }
        let config: TestConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TestGenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        TestConfig::from_json(&text)
    }

    /// Checks that do not need the bank. Bank-dependent checks happen at sampling time.
    pub fn validate(&self) -> Result<()> {
        let c = &self.constraints;
        if c.max_topic_count < c.min_topic_count {
            return Err(TestGenError::Config(format!(
                "max_topic_count {} < min_topic_count {}",
                c.max_topic_count, c.min_topic_count
            )));
        }
        if c.max_difficulty < c.min_difficulty {
            return Err(TestGenError::Config(format!(
                "max_difficulty {} < min_difficulty {}",
                c.max_difficulty, c.min_difficulty
            )));
        }
        if self.bank.as_os_str().is_empty() {
            return Err(TestGenError::Config("bank path is empty".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(TestGenError::Config("output path is empty".into()));
        }
        Ok(())
    }

    pub fn attempt_limit(&self) -> AttemptLimit {
        AttemptLimit::from(self.max_attempts)
    }

    pub fn request(&self) -> TestRequest {
        TestRequest {
            constraints: self.constraints,
            rng_seed: self.rng_seed,
            attempt_limit: self.attempt_limit(),
        }
    }

    /// Header with every configured variable. The fancy layout also gets
    /// `\numproblems` set to the test size unless the config already names it.
    pub fn header(&self) -> Result<Header> {
        let mut header = Header::new(&self.tex_header, &self.content_header);
        for (name, value) in &self.variables {
            header.add_command(name, value.as_str())?;
        }
        if self.layout == LayoutStyle::Fancy && !self.variables.contains_key(NUM_PROBLEMS_VAR) {
            header.add_command(NUM_PROBLEMS_VAR, self.constraints.size.to_string())?;
        }
        Ok(header)
    }
}
