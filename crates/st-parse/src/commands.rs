//! `parse`, `check` and `tokens` subcommands.

use std::io::Write;
use std::time::Instant;

use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::input::Input;
use crate::render;
use crate::style;

/// Error totals over a set of inputs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub failed_files: usize,
    pub errors: usize,
}

impl Summary {
    fn record(&mut self, errors: usize) {
        self.files += 1;
        self.errors += errors;
        if errors > 0 {
            self.failed_files += 1;
        }
    }

    /// Converts the totals into a failure when `deny_errors` is set.
    pub fn into_result(self, deny_errors: bool) -> anyhow::Result<()> {
        if deny_errors && self.errors > 0 {
            anyhow::bail!(
                "{} error(s) in {} of {} file(s)",
                self.errors,
                self.failed_files,
                self.files
            );
        }
        Ok(())
    }
}

/// Prints the tree of every input to `out` and its errors to `err`.
pub fn run_parse(
    inputs: &[Input],
    config: &Config,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();
    let headers = inputs.len() > 1 && config.format != OutputFormat::Json;
    for input in inputs {
        let started = Instant::now();
        let parse = st_syntax::parse(&input.text);
        debug!(
            file = %input.name,
            elapsed_us = started.elapsed().as_micros() as u64,
            "parsed"
        );
        if headers {
            writeln!(out, "{}", style::accent(format!("==> {} <==", input.name)))?;
        }
        out.write_all(render::render_tree(input, &parse, config.format, config.trivia)?.as_bytes())?;
        for line in render::error_lines(input, parse.errors(), config.max_errors) {
            writeln!(err, "{}", style::error(line))?;
        }
        summary.record(parse.errors().len());
    }
    info!(
        files = summary.files,
        errors = summary.errors,
        "parse finished"
    );
    Ok(summary)
}

/// Reports errors of every input to `out`, followed by a summary line.
pub fn run_check(
    inputs: &[Input],
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();
    for input in inputs {
        let parse = st_syntax::parse(&input.text);
        for line in render::error_lines(input, parse.errors(), config.max_errors) {
            writeln!(out, "{}", style::error(line))?;
        }
        summary.record(parse.errors().len());
    }
    let line = if summary.errors == 0 {
        style::success(format!("checked {} file(s): no errors", summary.files))
    } else {
        style::warning(format!(
            "checked {} file(s): {} error(s) in {} file(s)",
            summary.files, summary.errors, summary.failed_files
        ))
    };
    writeln!(out, "{line}")?;
    info!(
        files = summary.files,
        errors = summary.errors,
        "check finished"
    );
    Ok(summary)
}

/// Prints the token stream of `input`.
pub fn run_tokens(input: &Input, out: &mut impl Write) -> anyhow::Result<()> {
    out.write_all(render::render_tokens(&input.text).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, text: &str) -> Input {
        Input {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    fn run_parse_to_strings(inputs: &[Input], config: &Config) -> (Summary, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = run_parse(inputs, config, &mut out, &mut err).unwrap();
        (
            summary,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn parse_single_file_has_no_header() {
        let config = Config {
            format: OutputFormat::Sexp,
            ..Config::default()
        };
        let (summary, out, err) = run_parse_to_strings(&[input("a.st", "x := 1;")], &config);
        assert_eq!(
            out,
            "(source_file (block (assignment (identifier) (integer_literal))))\n"
        );
        assert!(err.is_empty());
        assert_eq!(
            summary,
            Summary {
                files: 1,
                failed_files: 0,
                errors: 0
            }
        );
    }

    #[test]
    fn parse_many_files_prints_headers_and_errors() {
        let config = Config {
            format: OutputFormat::Sexp,
            ..Config::default()
        };
        let inputs = [input("a.st", "x := 1;"), input("b.st", "y := 2")];
        let (summary, out, err) = run_parse_to_strings(&inputs, &config);
        assert!(out.contains("==> a.st <=="));
        assert!(out.contains("==> b.st <=="));
        assert_eq!(err, "b.st:1:7: expected ';'\n");
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.errors, 1);
        assert!(summary.into_result(true).is_err());
        assert!(summary.into_result(false).is_ok());
    }

    #[test]
    fn json_output_has_no_headers() {
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };
        let inputs = [input("a.st", "x := 1;"), input("b.st", "y := 2;")];
        let (_, out, _) = run_parse_to_strings(&inputs, &config);
        assert!(!out.contains("==>"));
        assert_eq!(out.matches("\"path\"").count(), 2);
    }

    #[test]
    fn check_reports_summary() {
        let mut out = Vec::new();
        let inputs = [input("ok.st", "x := 1;"), input("bad.st", "IF a THEN")];
        let summary = run_check(&inputs, &Config::default(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("bad.st:1:10: expected END_IF"), "{out}");
        assert!(out.ends_with("in 1 file(s)\n"), "{out}");
        assert_eq!(summary.files, 2);
        assert_eq!(summary.failed_files, 1);
    }

    #[test]
    fn check_clean_inputs() {
        let mut out = Vec::new();
        let summary = run_check(&[input("ok.st", "x := 1;")], &Config::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "checked 1 file(s): no errors\n");
        assert!(summary.into_result(true).is_ok());
    }

    #[test]
    fn tokens_command_writes_listing() {
        let mut out = Vec::new();
        run_tokens(&input("t.st", "a;"), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Ident@0..1 \"a\"\nSemicolon@1..2 \";\"\n"
        );
    }
}
