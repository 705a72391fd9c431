//! Error types and error handling for the parser.
//!
//! This module defines the error types produced while tokenizing and
//! parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexical, syntactic and internal failures
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
