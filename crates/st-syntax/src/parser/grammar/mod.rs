//! Grammar rules for IEC 61131-3 Structured Text.
//!
//! This module contains the grammar rules organized by category:
//!
//! - `pou.rs` - Top-level declarations (FUNCTION_BLOCK, FUNCTION, PROGRAM)
//! - `declarations.rs` - Variable sections, type declarations and type names
//! - `statements.rs` - Statements and blocks
//! - `expressions.rs` - Expression parsing (precedence climbing)

mod declarations;
mod expressions;
mod pou;
mod statements;
