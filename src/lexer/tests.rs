//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers, floats, exponents)
//! - String literals with escape sequences
//! - Maximal munch of operators and punctuation
//! - Template literals and brace tracking
//! - Comments, positions and line breaks
//! - Lookahead and error cases

use crate::{errors::errors::ErrorImpl, Position};

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.js".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "var let const function class extends return if else for while do new import export";
    let tokens = tokenize(source, Some("test.js".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::Const);
    assert_eq!(tokens[3].kind, TokenKind::Function);
    assert_eq!(tokens[4].kind, TokenKind::Class);
    assert_eq!(tokens[5].kind, TokenKind::Extends);
    assert_eq!(tokens[6].kind, TokenKind::Return);
    assert_eq!(tokens[7].kind, TokenKind::If);
    assert_eq!(tokens[8].kind, TokenKind::Else);
    assert_eq!(tokens[9].kind, TokenKind::For);
    assert_eq!(tokens[10].kind, TokenKind::While);
    assert_eq!(tokens[11].kind, TokenKind::Do);
    assert_eq!(tokens[12].kind, TokenKind::New);
    assert_eq!(tokens[13].kind, TokenKind::Import);
    assert_eq!(tokens[14].kind, TokenKind::Export);
    assert_eq!(tokens[15].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_literal_words() {
    let tokens = tokenize("true false null undefined", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].value, "false");
    assert_eq!(tokens[2].kind, TokenKind::Null);
    assert_eq!(tokens[3].kind, TokenKind::Undefined);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore $dollar CamelCase café of get";
    let tokens = tokenize(source, Some("test.js".to_string())).unwrap();

    let values: Vec<&str> = tokens[..9].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["foo", "bar", "baz_123", "_underscore", "$dollar", "CamelCase", "café", "of", "get"]
    );
    assert!(tokens[..9].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[9].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 0.5 .25 1e3 2.5E-2 7. 0e1 0E-3 0.", None).unwrap();

    let values: Vec<&str> = tokens[..11].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["42", "3.14", "0", "0.5", ".25", "1e3", "2.5e-2", "7.", "0e1", "0e-3", "0."]
    );
    assert!(tokens[..11].iter().all(|t| t.kind == TokenKind::Number));
    assert_eq!(tokens[6].raw, "2.5E-2");
    assert_eq!(tokens[9].raw, "0E-3");
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_reject_letters_after_zero() {
    for source in ["0a", "0n", "0e"] {
        let error = tokenize(source, None).unwrap_err();
        assert_eq!(error.get_error_name(), "NumberParseError", "source: {}", source);
    }
}

#[test]
fn test_reject_radix_prefixed_numbers() {
    for source in ["0x1F", "0b101", "0o17", "017"] {
        let error = tokenize(source, None).unwrap_err();
        assert_eq!(error.get_error_name(), "NumberParseError", "source: {}", source);
        assert!(error.is_lexical());
    }
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" 'world' "multiple words""#, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[0].raw, "\"hello\"");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "backslash\\" "hex\x41" "uniB\u{1F600}" 'it\'s'"#;
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "backslash\\");
    assert_eq!(tokens[3].value, "hexA");
    assert_eq!(tokens[4].value, "uniB\u{1F600}");
    assert_eq!(tokens[5].value, "it's");
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("let s = \"abc", None).unwrap_err();

    assert_eq!(error.get_internal(), &ErrorImpl::UnterminatedString);
    assert_eq!(*error.get_position(), Position::new(1, 9, 8));
}

#[test]
fn test_invalid_escape() {
    let error = tokenize(r#""\x4""#, None).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidEscape");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % == != === !== < > <= >= = && || ** !"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::StrictEquals,
            TokenKind::StrictNotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::StarStar,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_maximal_munch_shift_operators() {
    assert_eq!(
        kinds(">>>= >>> >>= >> >= > <<= <<"),
        vec![
            TokenKind::UnsignedShiftRightEquals,
            TokenKind::UnsignedShiftRight,
            TokenKind::ShiftRightEquals,
            TokenKind::ShiftRight,
            TokenKind::GreaterEquals,
            TokenKind::Greater,
            TokenKind::ShiftLeftEquals,
            TokenKind::ShiftLeft,
            TokenKind::EOF,
        ]
    );

    // Without whitespace the longest candidate wins at every step.
    assert_eq!(
        kinds("a>>>=b"),
        vec![
            TokenKind::Identifier,
            TokenKind::UnsignedShiftRightEquals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("a+++b"),
        vec![
            TokenKind::Identifier,
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : => ... ?. ? ~"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Arrow,
            TokenKind::Ellipsis,
            TokenKind::QuestionDot,
            TokenKind::Question,
            TokenKind::Tilde,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_compound_assignment_operators() {
    assert_eq!(
        kinds("+= -= *= /= %= **= &= |= ^= &&= ||="),
        vec![
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::StarStarEquals,
            TokenKind::AmpersandEquals,
            TokenKind::PipeEquals,
            TokenKind::CaretEquals,
            TokenKind::AndEquals,
            TokenKind::OrEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_question_dot_before_digit_is_conditional() {
    assert_eq!(
        kinds("a?.5:b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Question,
            TokenKind::Number,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_nullish_coalescing_is_rejected() {
    let error = tokenize("a ?? b", None).unwrap_err();
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::UnsupportedOperator {
            token: "??".to_string()
        }
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("let x = 5 // this is a comment\nlet /* inline */ y = 10", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert!(tokens[4].newline_before);
    assert_eq!(tokens[5].value, "y");
    assert!(!tokens[5].newline_before);
    assert_eq!(tokens[7].value, "10");
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_block_comment_with_newline_counts_as_line_break() {
    let tokens = tokenize("a /* one\ntwo */ b", None).unwrap();
    assert!(tokens[1].newline_before);
    assert_eq!(tokens[1].span.start.row, 2);
}

#[test]
fn test_unterminated_comment() {
    let error = tokenize("a /* never closed", None).unwrap_err();
    assert_eq!(error.get_internal(), &ErrorImpl::UnterminatedComment);
    assert_eq!(error.get_position().index, 2);
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("let x\n  = 42;", None).unwrap();

    assert_eq!(tokens[0].span.start, Position::new(1, 1, 0));
    assert_eq!(tokens[0].span.end, Position::new(1, 4, 3));
    assert_eq!(tokens[1].span.start, Position::new(1, 5, 4));
    assert_eq!(tokens[2].span.start, Position::new(2, 3, 8));
    assert_eq!(tokens[3].span.start, Position::new(2, 5, 10));
    assert_eq!(tokens[3].span.end, Position::new(2, 7, 12));
}

#[test]
fn test_byte_index_counts_utf8_width() {
    let tokens = tokenize("'é' x", None).unwrap();

    assert_eq!(tokens[0].span.end.index, 4);
    assert_eq!(tokens[1].span.start, Position::new(1, 5, 5));
}

#[test]
fn test_private_name() {
    let tokens = tokenize("this.#secret", None).unwrap();

    assert_eq!(tokens[2].kind, TokenKind::PrivateName);
    assert_eq!(tokens[2].value, "secret");
    assert_eq!(tokens[2].raw, "#secret");
}

#[test]
fn test_template_without_substitution() {
    let tokens = tokenize("`plain text`", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::TemplateString);
    assert_eq!(tokens[0].value, "plain text");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_template_with_substitutions() {
    let tokens = tokenize("`a${x}b${y}c`", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::TemplateHead);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::TemplateMiddle);
    assert_eq!(tokens[2].value, "b");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::TemplateTail);
    assert_eq!(tokens[4].value, "c");
    assert_eq!(tokens[4].raw, "}c`");
}

#[test]
fn test_template_object_literal_inside_substitution() {
    assert_eq!(
        kinds("`a${ {x:1} }b`"),
        vec![
            TokenKind::TemplateHead,
            TokenKind::OpenCurly,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Number,
            TokenKind::CloseCurly,
            TokenKind::TemplateTail,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_nested_templates() {
    assert_eq!(
        kinds("`outer ${ `inner ${ {a: {}} } done` } end` }"),
        vec![
            TokenKind::TemplateHead,
            TokenKind::TemplateHead,
            TokenKind::OpenCurly,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::CloseCurly,
            TokenKind::TemplateTail,
            TokenKind::TemplateTail,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_template_escapes_and_line_breaks() {
    let tokens = tokenize("`line\\n\\${x}\r\nnext`", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::TemplateString);
    assert_eq!(tokens[0].value, "line\n${x}\nnext");
    assert_eq!(tokens[1].span.start.row, 2);
}

#[test]
fn test_unterminated_template() {
    let error = tokenize("`abc ${x} def", None).unwrap_err();
    assert_eq!(error.get_internal(), &ErrorImpl::UnterminatedTemplate);
}

#[test]
fn test_lookahead_does_not_consume() {
    let mut lexer = Lexer::new("async function f", None);

    assert_eq!(lexer.get_token().unwrap().kind, TokenKind::Async);
    assert_eq!(lexer.lookahead().unwrap().kind, TokenKind::Function);
    assert_eq!(lexer.get_token().unwrap().kind, TokenKind::Async);
    assert_eq!(lexer.get_source_value(), "async");

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Function);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.get_start_position(), Position::new(1, 16, 15));
    assert_eq!(lexer.get_end_position(), Position::new(1, 17, 16));
}

#[test]
fn test_lookahead_restores_template_state() {
    let mut lexer = Lexer::new("`${a}b` c", None);

    assert_eq!(lexer.get_token().unwrap().kind, TokenKind::TemplateHead);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    // Peeking at the `}` pops the template entry; it must be back afterwards.
    assert_eq!(lexer.lookahead().unwrap().kind, TokenKind::TemplateTail);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::TemplateTail);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let error = tokenize("let x = @", Some("test.js".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().index, 8);
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize("   \n  ", None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert!(tokens[0].newline_before);
}
