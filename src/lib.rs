#![allow(clippy::module_inception)]

use std::fmt::Display;

use serde::Serialize;

use crate::{
    ast::statements::Program,
    errors::errors::{Error, ErrorTip},
    parser::parser::Parser,
};

pub mod ast;
pub mod binder;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in the source text.
///
/// `row` and `column` are 1-based, `index` is the 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: u32,
    pub column: u32,
    pub index: usize,
}

impl Position {
    pub fn new(row: u32, column: u32, index: usize) -> Self {
        Position { row, column, index }
    }

    /// The position of the first character of a source text.
    pub fn start() -> Self {
        Position::new(1, 1, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Returns whether `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start.index <= other.start.index && other.end.index <= self.end.index
    }
}

/// Parses a complete source text into a [`Program`].
pub fn parse_program(source: &str) -> Result<Program, Error> {
    Parser::new(source).parse()
}

/// Returns the 1-based line number, the text of that line and the 0-based
/// column (in characters) for a byte offset into `source`.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let pos = position.min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = source[start..pos].chars().count();
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    // End of input: point just past the last character of the last line.
    let last = source.rsplit('\n').next().unwrap_or("");
    let line_number = source.matches('\n').count() + 1;
    (line_number, last.to_string(), last.chars().count())
}

/// Renders an error as a caret diagnostic pointing into the source line.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: message
        -> main.js
           |
        20 | let a = #;
           | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.index);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}:{}\n", file, position));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    out
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    eprintln!("{}", format_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
