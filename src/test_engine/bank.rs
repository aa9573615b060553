//! Problem-bank loading.
//!
//! Two on-disk formats are accepted:
//!
//! - **TeX** (default): each problem is a block
//!
//!   ```text
//!   \begin{problem}{addition}{3}
//!   What is $2 + 2$?
//!   \answer
//!   $4$
//!   \end{problem}
//!   ```
//!
//!   Anything between blocks (preamble, `%` comments, blank lines) is ignored.
//!   A `%` comment may also trail the `\begin`, `\answer` and `\end` lines.
//!   The `\answer` line is optional; without it the answer is empty. Text on
//!   the same line as `\answer` is the first line of the answer.
//!
//! - **JSON** (`.json` files): an array of `{topic, difficulty, question, answer}`.
//!
//! Bank order is file order.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::test_engine::{
    error::{Result, TestGenError},
    models::{Bank, Problem},
};

const BEGIN: &str = r"\begin{problem}";
const ANSWER: &str = r"\answer";
const END: &str = r"\end{problem}";

/// Read a bank from `path`, picking the format from the file extension.
pub fn load_bank(path: impl AsRef<Path>) -> Result<Bank> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TestGenError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let bank = if is_json { parse_json_bank(&text)? } else { parse_tex_bank(&text)? };
    info!(
        "loaded {} problems in {} topics from {}",
        bank.len(),
        bank.topics().len(),
        path.display()
    );
    Ok(bank)
}

pub fn parse_json_bank(text: &str) -> Result<Bank> {
    let problems: Vec<Problem> = serde_json::from_str(text)?;
    Ok(Bank::new(problems))
}

/// Header of an open block, waiting for its body.
struct OpenBlock {
    line: usize,
    topic: String,
    difficulty: i32,
    question: Vec<String>,
    answer: Option<Vec<String>>,
}

impl OpenBlock {
    fn push(&mut self, text: &str) {
        match &mut self.answer {
            Some(answer) => answer.push(text.to_string()),
            None => self.question.push(text.to_string()),
        }
    }

    fn finish(self) -> Problem {
        let answer = self.answer.map(|a| join(&a)).unwrap_or_default();
        Problem {
            topic: self.topic,
            difficulty: self.difficulty,
            question: join(&self.question),
            answer,
        }
    }
}

fn join(lines: &[String]) -> String {
    lines.join("\n").trim().to_string()
}

/// Drop a trailing `%` comment. `\%` is a literal percent sign, not a comment.
fn strip_comment(line: &str) -> &str {
    let mut backslashes = 0usize;
    for (i, ch) in line.char_indices() {
        match ch {
            '\\' => backslashes += 1,
            '%' if backslashes % 2 == 0 => return &line[..i],
            _ => backslashes = 0,
        }
    }
    line
}

/// Text following an `\answer` marker, or `None` if the line is not one.
///
/// `\answers` or `\answerbox` are other control words and stay as content.
fn answer_marker(code: &str) -> Option<&str> {
    let rest = code.strip_prefix(ANSWER)?;
    if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(rest.trim())
}

fn parse_error(line: usize, reason: impl Into<String>) -> TestGenError {
    TestGenError::BankParse { line, reason: reason.into() }
}

/// Split a leading `{...}` group off `s`, honouring nested braces.
fn brace_group(s: &str) -> Option<(&str, &str)> {
    let rest = s.trim_start().strip_prefix('{')?;
    let mut depth = 1usize;
    for (i, ch) in rest.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&rest[..i], &rest[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse `\begin{problem}{<topic>}{<difficulty>}` (already stripped of `\begin{problem}`).
fn parse_opening(args: &str, line: usize) -> Result<(String, i32)> {
    let (topic, rest) = brace_group(args)
        .ok_or_else(|| parse_error(line, "expected {topic}{difficulty} after \\begin{problem}"))?;
    let (difficulty, rest) = brace_group(rest)
        .ok_or_else(|| parse_error(line, "expected {difficulty} after the topic"))?;
    if !rest.trim().is_empty() {
        return Err(parse_error(line, format!("unexpected text after the header: '{}'", rest.trim())));
    }

    let topic = topic.trim();
    if topic.is_empty() {
        return Err(parse_error(line, "empty topic"));
    }
    let difficulty: i32 = difficulty
        .trim()
        .parse()
        .map_err(|_| parse_error(line, format!("difficulty '{}' is not an integer", difficulty.trim())))?;

    Ok((topic.to_string(), difficulty))
}

pub fn parse_tex_bank(text: &str) -> Result<Bank> {
    let mut problems = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let code = strip_comment(raw).trim();

        if let Some(args) = code.strip_prefix(BEGIN) {
            if let Some(block) = &open {
                return Err(parse_error(
                    line,
                    format!("problem opened on line {} is still open", block.line),
                ));
            }
            let (topic, difficulty) = parse_opening(args, line)?;
            open = Some(OpenBlock { line, topic, difficulty, question: Vec::new(), answer: None });
            continue;
        }

        let Some(block) = open.as_mut() else {
            continue;
        };

        if code == END {
            if let Some(block) = open.take() {
                problems.push(block.finish());
            }
        } else if let Some(rest) = answer_marker(code) {
            if block.answer.is_some() {
                return Err(parse_error(line, "second \\answer in one problem"));
            }
            let first = if rest.is_empty() { Vec::new() } else { vec![rest.to_string()] };
            block.answer = Some(first);
        } else {
            block.push(raw);
        }
    }

    if let Some(block) = open {
        return Err(parse_error(block.line, "problem is never closed with \\end{problem}"));
    }

    debug!("parsed {} problems from TeX bank", problems.len());
    Ok(Bank::new(problems))
}
