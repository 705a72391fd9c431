//! Utility macros for the parser.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span from a start position to the parser's last consumed token
//!
//! These macros reduce boilerplate in the lexer and parser.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's cooked string value
/// * `$raw` - The token's source text
/// * `$span` - The source span
/// * `$newline` - Whether a line terminator precedes the token
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), "42".to_string(), span, false);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $raw:expr, $span:expr, $newline:expr) => {
        Token {
            kind: $kind,
            value: $value,
            raw: $raw,
            span: $span,
            newline_before: $newline,
        }
    };
}

/// Creates a span that starts at `$start` and ends where the last consumed
/// token of `$parser` ended.
///
/// # Example
///
/// ```ignore
/// let start = parser.get_position();
/// parser.advance()?;
/// let span = MK_SPAN!(parser, start);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($parser:expr, $start:expr) => {
        $crate::Span {
            start: $start,
            end: $parser.prev_end(),
        }
    };
}
