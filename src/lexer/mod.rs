//! Lexical analysis module for the parser.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into tokens on demand. It handles:
//!
//! - Maximal-munch recognition of punctuators and operators
//! - Keywords, identifiers, private names and literals
//! - Template literals, including `${` / `}` brace tracking
//! - Token position tracking for error reporting
//! - Comments, whitespace and line-break bookkeeping

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
