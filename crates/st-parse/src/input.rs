//! Input collection: paths, glob patterns and standard input.

use anyhow::{bail, Context};
use std::io::Read;
use std::path::PathBuf;
use text_size::TextSize;
use tracing::debug;

/// Name used for standard input in reports.
pub const STDIN_NAME: &str = "<stdin>";

/// One source text to parse.
#[derive(Debug, Clone)]
pub struct Input {
    /// Display name: the path, or `<stdin>`.
    pub name: String,
    /// Full source text.
    pub text: String,
}

impl Input {
    /// Returns the 1-based line and column of `offset`.
    ///
    /// Columns count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, offset: TextSize) -> (usize, usize) {
        let offset = usize::from(offset).min(self.text.len());
        let before = self.text.get(..offset).unwrap_or(&self.text);
        let line_start = before.rfind('\n').map_or(0, |index| index + 1);
        let line = before.matches('\n').count() + 1;
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// Expands `patterns` into inputs, in argument order.
///
/// `-` reads standard input once. Patterns containing glob metacharacters
/// are expanded; a pattern that matches nothing is an error.
pub fn collect_inputs(patterns: &[String]) -> anyhow::Result<Vec<Input>> {
    let mut inputs = Vec::new();
    let mut stdin_used = false;
    for pattern in patterns {
        if pattern == "-" {
            if stdin_used {
                bail!("standard input given more than once");
            }
            stdin_used = true;
            inputs.push(read_stdin()?);
            continue;
        }
        for path in expand_pattern(pattern)? {
            inputs.push(read_file(path)?);
        }
    }
    Ok(inputs)
}

/// Reads a single input for commands that take exactly one.
pub fn single_input(pattern: &str) -> anyhow::Result<Input> {
    if pattern == "-" {
        return read_stdin();
    }
    read_file(PathBuf::from(pattern))
}

fn expand_pattern(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![PathBuf::from(pattern)]);
    }
    let mut paths = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
        let path = entry.with_context(|| format!("failed to expand {pattern}"))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        bail!("no files match {pattern}");
    }
    debug!(pattern, files = paths.len(), "expanded glob pattern");
    Ok(paths)
}

fn read_file(path: PathBuf) -> anyhow::Result<Input> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Input {
        name: path.display().to_string(),
        text,
    })
}

fn read_stdin() -> anyhow::Result<Input> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read standard input")?;
    Ok(Input {
        name: STDIN_NAME.to_string(),
        text,
    })
}
