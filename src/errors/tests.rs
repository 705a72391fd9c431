//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorCategory, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 11, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(error.is_lexical());
}

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::UnterminatedString, Position::new(3, 7, 42));

    assert_eq!(error.get_position().index, 42);
    assert_eq!(error.get_position().row, 3);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: Some(TokenKind::CloseParen),
            found: TokenKind::Semicolon,
            token: ";".to_string(),
        },
        Position::start(),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `;`, expected CloseParen"
    );
}

#[test]
fn test_unexpected_token_without_expectation() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: None,
            found: TokenKind::EOF,
            token: "".to_string(),
        },
        Position::start(),
    );

    assert_eq!(error.get_tip().to_string(), "Unexpected token: ``");
}

#[test]
fn test_unreachable_is_internal() {
    let error = Error::new(
        ErrorImpl::Unreachable {
            message: "parse_class entered on `let`".to_string(),
        },
        Position::start(),
    );

    assert!(error.is_internal());
    assert!(!error.is_lexical());
    assert!(error.get_tip().to_string().contains("bug in the parser"));
}

#[test]
fn test_lexical_categories() {
    let lexical = [
        ErrorImpl::UnterminatedString,
        ErrorImpl::UnterminatedTemplate,
        ErrorImpl::UnterminatedComment,
        ErrorImpl::NumberParseError {
            token: "0x1".to_string(),
        },
        ErrorImpl::UnsupportedOperator {
            token: "??".to_string(),
        },
        ErrorImpl::InvalidEscape {
            sequence: "x4".to_string(),
        },
    ];

    for error_impl in lexical {
        let error = Error::new(error_impl, Position::start());
        assert_eq!(error.category(), ErrorCategory::Lexical);
    }
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "0b1".to_string(),
        },
        Position::new(2, 5, 12),
    );

    assert_eq!(error.to_string(), "error parsing number: \"0b1\" at 2:5");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::start(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_invalid_modifiers_tip() {
    let error = Error::new(
        ErrorImpl::InvalidModifiers {
            message: "getter cannot be async".to_string(),
        },
        Position::start(),
    );

    assert_eq!(error.get_error_name(), "InvalidModifiers");
    assert_eq!(error.get_tip().to_string(), "getter cannot be async");
}

#[test]
fn test_nesting_error_is_syntax() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 128 }, Position::start());

    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_internal().to_string(), "nesting exceeds 128 levels");
}
