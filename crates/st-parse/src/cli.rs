//! CLI definitions for stparse.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "stparse",
    version,
    about = "Parse IEC 61131-3 Structured Text and inspect the syntax tree",
    infer_subcommands = true,
    after_help = "Examples:\n  stparse parse src/main.st              # print the syntax tree\n  stparse parse 'src/**/*.st' --format sexp\n  stparse check 'src/**/*.st'            # report errors only\n  echo 'x := 1;' | stparse tokens -"
)]
pub struct Cli {
    /// Show informational log output.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Configuration file (defaults to ./stparse.toml or ./.stparse.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the syntax tree of each input, followed by its errors.
    Parse {
        /// Files or glob patterns; `-` reads standard input.
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Tree output format.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Include whitespace and comment tokens in tree and JSON output.
        #[arg(long)]
        trivia: bool,
    },
    /// Report parse errors without printing trees.
    Check {
        /// Files or glob patterns; `-` reads standard input.
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Print the token stream of one input.
    Tokens {
        /// File path; `-` reads standard input.
        input: String,
    },
}

/// How `stparse parse` prints a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented `Kind@start..end` lines.
    #[default]
    Tree,
    /// Tree-sitter style S-expression of node kinds.
    Sexp,
    /// Nested JSON objects, one document per input.
    Json,
}
