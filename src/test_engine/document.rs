//! Assembles the final `.tex` file: header, formatted problems, footer.
//!
//! The header pulls in two shared TeX files and defines one `\newcommand` per
//! header variable (class name, term, title, ...) between them, so the
//! included content header can refer to `\class`, `\testtitle` and so on.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;

use crate::test_engine::{
    error::{Result, TestGenError},
    layout::ProblemLayout,
    models::Problem,
};

/// Closes the `enumerate` opened by the content header and the document.
pub const FOOTER: &str = "\\end{enumerate}\n\\end{document}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    tex_file: String,
    content_file: String,
    commands: BTreeMap<String, String>,
}

/// TeX control words are letters only.
fn is_control_word(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}

impl Header {
    pub fn new(tex_file: impl Into<String>, content_file: impl Into<String>) -> Self {
        Header {
            tex_file: tex_file.into(),
            content_file: content_file.into(),
            commands: BTreeMap::new(),
        }
    }

    /// Define `\name` as `value`. A second call with the same name replaces the value.
    pub fn add_command(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        if !is_control_word(name) {
            return Err(TestGenError::InvalidCommand(name.to_string()));
        }
        self.commands.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn commands(&self) -> &BTreeMap<String, String> {
        &self.commands
    }

    pub fn render(&self) -> String {
        let mut out = format!("\\input{{{}}}\n", self.tex_file);
        for (name, value) in &self.commands {
            out.push_str(&format!("\\newcommand{{\\{name}}}{{{value}}}\n"));
        }
        out.push_str(&format!("\\input{{{}}}\n", self.content_file));
        out
    }
}

/// Header, then each problem formatted with its 1-based position, then [`FOOTER`].
pub fn render_document(header: &Header, layout: &dyn ProblemLayout, problems: &[Problem]) -> String {
    let mut out = header.render();
    for (i, problem) in problems.iter().enumerate() {
        out.push_str(&layout.format(problem, i + 1));
    }
    out.push_str(FOOTER);
    out
}

pub fn write_document(path: impl AsRef<Path>, document: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, document).map_err(|source| TestGenError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {} bytes to {}", document.len(), path.display());
    Ok(())
}
