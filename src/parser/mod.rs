//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that turns the lexer's
//! token stream into a [`Program`](crate::ast::statements::Program). Binary
//! operators are parsed by precedence climbing over the binding powers in
//! [`lookups`]; everything else is one function per grammar production:
//!
//! - Module items (imports and exports) at the top level
//! - Statements and variable declarations
//! - Functions, classes and object/class members
//! - Expressions, from assignment down to primary expressions
//! - Binding and assignment patterns
//!
//! Primary expressions and statements are dispatched through lookup tables
//! keyed by the current token.

pub mod expr;
pub mod functions;
pub mod lookups;
pub mod modules;
pub mod parser;
pub mod patterns;
pub mod stmt;

#[cfg(test)]
mod tests;
