use std::fmt;
use serde::{Deserialize, Serialize};

use crate::test_engine::models::Problem;

/// Turns one problem and its 1-based position on the test into TeX.
pub trait ProblemLayout {
    fn format(&self, problem: &Problem, number: usize) -> String;
}

/// One `\item` per problem, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleLayout;

impl ProblemLayout for SimpleLayout {
    fn format(&self, problem: &Problem, _number: usize) -> String {
        format!("\\item {}\n", problem.question)
    }
}

/// Two problems per page with an answer blank in the right margin.
///
/// Odd-numbered problems start a new page; even-numbered ones sit below a
/// block of working space.
#[derive(Debug, Clone, Copy, Default)]
pub struct FancyLayout;

impl ProblemLayout for FancyLayout {
    fn format(&self, problem: &Problem, number: usize) -> String {
        let mut out = String::new();
        if number % 2 == 1 {
            out.push_str("\\pagebreak\n\n");
        } else {
            out.push_str("\\vspace{350pt}\n\n");
        }
        out.push_str("\\item\\begin{tabular}[t]{p{5in} p{.3in} p{.8in}}\n");
        out.push_str(&problem.question);
        out.push_str("& & \\arabic{enumi}.\\hrulefill\n\\end{tabular}\n");
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    #[default]
    Simple,
    Fancy,
}

impl LayoutStyle {
    pub fn layout(self) -> Box<dyn ProblemLayout> {
        match self {
            LayoutStyle::Simple => Box::new(SimpleLayout),
            LayoutStyle::Fancy  => Box::new(FancyLayout),
        }
    }
}

impl fmt::Display for LayoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutStyle::Simple => write!(f, "simple"),
            LayoutStyle::Fancy  => write!(f, "fancy"),
        }
    }
}
