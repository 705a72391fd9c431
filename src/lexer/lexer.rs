use std::rc::Rc;

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, IDENTIFIER_PATTERN, OPERATOR_LOOKUP, RESERVED_LOOKUP};

/// What an open `{` on the brace stack belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BraceKind {
    /// An ordinary block, object literal or class body brace.
    Block,
    /// The `${` of a template substitution; its `}` resumes template text.
    Template,
}

/// Everything that changes while lexing. Cloned as a whole for lookahead.
#[derive(Debug, Clone)]
struct LexerState {
    /// Index into `Lexer::chars`.
    pos: usize,
    position: Position,
    token: Option<Token>,
    braces: Vec<BraceKind>,
}

/// On-demand tokenizer with a single current token.
pub struct Lexer {
    source: Rc<str>,
    chars: Vec<char>,
    state: LexerState,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: Rc::from(source),
            chars: source.chars().collect(),
            state: LexerState {
                pos: 0,
                position: Position::start(),
                token: None,
                braces: vec![],
            },
            file: file_name,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the current token, lexing the first one on first access.
    pub fn get_token(&mut self) -> Result<&Token, Error> {
        if self.state.token.is_none() {
            let token = self.lex()?;
            self.state.token = Some(token);
        }

        self.current().ok_or_else(|| {
            Error::new(
                ErrorImpl::Unreachable {
                    message: String::from("current token missing after lexing"),
                },
                self.state.position,
            )
        })
    }

    /// Advances to the next token and returns it.
    pub fn next_token(&mut self) -> Result<&Token, Error> {
        let token = self.lex()?;
        trace!(kind:? = token.kind, value = token.value.as_str(); "Lexed token");
        let token: &Token = self.state.token.insert(token);
        Ok(token)
    }

    /// Returns the token after the current one without consuming anything.
    pub fn lookahead(&mut self) -> Result<Token, Error> {
        self.get_token()?;
        let snapshot = self.state.clone();
        let result = self.next_token().cloned();
        self.state = snapshot;
        trace!("Restored lexer state after lookahead");
        result
    }

    pub fn current(&self) -> Option<&Token> {
        self.state.token.as_ref()
    }

    pub fn get_source_value(&self) -> &str {
        self.current().map(|token| token.value.as_str()).unwrap_or("")
    }

    pub fn get_start_position(&self) -> Position {
        self.current()
            .map(|token| token.span.start)
            .unwrap_or(self.state.position)
    }

    pub fn get_end_position(&self) -> Position {
        self.current()
            .map(|token| token.span.end)
            .unwrap_or(self.state.position)
    }

    fn at(&self) -> Option<char> {
        self.chars.get(self.state.pos).copied()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.state.pos + n).copied()
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.at()?;
        self.state.pos += 1;
        self.state.position.index += c.len_utf8();

        // `\r\n` counts as one line break, taken at the `\n`.
        let breaks_line = is_line_terminator(c) && !(c == '\r' && self.at() == Some('\n'));
        if breaks_line {
            self.state.position.row += 1;
            self.state.position.column = 1;
        } else {
            self.state.position.column += 1;
        }

        Some(c)
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn error(&self, error_impl: ErrorImpl, position: Position) -> Error {
        Error::new(error_impl, position)
    }

    fn finish(&self, kind: TokenKind, value: String, start: Position, newline: bool) -> Token {
        let end = self.state.position;
        let raw = self.source[start.index..end.index].to_string();
        MK_TOKEN!(kind, value, raw, Span { start, end }, newline)
    }

    /// Skips whitespace and comments. Returns whether a line terminator was seen.
    fn skip_trivia(&mut self) -> Result<bool, Error> {
        let mut newline = false;

        while let Some(c) = self.at() {
            if is_line_terminator(c) {
                newline = true;
                self.advance();
            } else if c.is_whitespace() || c == '\u{feff}' {
                self.advance();
            } else if c == '/' && self.peek(1) == Some('/') {
                while let Some(c) = self.at() {
                    if is_line_terminator(c) {
                        break;
                    }
                    self.advance();
                }
            } else if c == '/' && self.peek(1) == Some('*') {
                let start = self.state.position;
                self.advance_n(2);
                loop {
                    match self.at() {
                        None => return Err(self.error(ErrorImpl::UnterminatedComment, start)),
                        Some('*') if self.peek(1) == Some('/') => {
                            self.advance_n(2);
                            break;
                        }
                        Some(c) => {
                            if is_line_terminator(c) {
                                newline = true;
                            }
                            self.advance();
                        }
                    }
                }
            } else {
                break;
            }
        }

        Ok(newline)
    }

    fn lex(&mut self) -> Result<Token, Error> {
        let newline = self.skip_trivia()?;
        let start = self.state.position;

        let c = match self.at() {
            Some(c) => c,
            None => return Ok(self.finish(TokenKind::EOF, String::from("EOF"), start, newline)),
        };

        match c {
            '{' => {
                self.state.braces.push(BraceKind::Block);
                Ok(self.single(TokenKind::OpenCurly, start, newline))
            }
            '}' => match self.state.braces.pop() {
                Some(BraceKind::Template) => {
                    self.advance();
                    self.read_template_segment(start, newline, false)
                }
                _ => Ok(self.single(TokenKind::CloseCurly, start, newline)),
            },
            '(' => Ok(self.single(TokenKind::OpenParen, start, newline)),
            ')' => Ok(self.single(TokenKind::CloseParen, start, newline)),
            '[' => Ok(self.single(TokenKind::OpenBracket, start, newline)),
            ']' => Ok(self.single(TokenKind::CloseBracket, start, newline)),
            ';' => Ok(self.single(TokenKind::Semicolon, start, newline)),
            ',' => Ok(self.single(TokenKind::Comma, start, newline)),
            ':' => Ok(self.single(TokenKind::Colon, start, newline)),
            '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number(start, newline)
            }
            '?' => self.read_question(start, newline),
            '0'..='9' => self.read_number(start, newline),
            '\'' | '"' => self.read_string(c, start, newline),
            '`' => {
                self.advance();
                self.read_template_segment(start, newline, true)
            }
            '#' => self.read_private_name(start, newline),
            _ if OPERATOR_LOOKUP.contains_key(&c) => self.read_operator(c, start, newline),
            _ => self.read_word(start, newline),
        }
    }

    fn single(&mut self, kind: TokenKind, start: Position, newline: bool) -> Token {
        let value = self.advance().map(String::from).unwrap_or_default();
        self.finish(kind, value, start, newline)
    }

    /// Maximal munch over the candidates registered for `first`.
    fn read_operator(&mut self, first: char, start: Position, newline: bool) -> Result<Token, Error> {
        let candidates = OPERATOR_LOOKUP.get(&first).ok_or_else(|| {
            self.error(
                ErrorImpl::Unreachable {
                    message: format!("no operator table for {:?}", first),
                },
                start,
            )
        })?;

        for (text, kind) in candidates.iter() {
            if self.starts_with(text) {
                self.advance_n(text.chars().count());
                return Ok(self.finish(*kind, String::from(*text), start, newline));
            }
        }

        Err(self.error(
            ErrorImpl::UnrecognisedToken {
                token: first.to_string(),
            },
            start,
        ))
    }

    fn read_question(&mut self, start: Position, newline: bool) -> Result<Token, Error> {
        if self.starts_with("??") {
            let token = if self.peek(2) == Some('=') { "??=" } else { "??" };
            return Err(self.error(
                ErrorImpl::UnsupportedOperator {
                    token: String::from(token),
                },
                start,
            ));
        }

        // `a?.5:b` is a conditional, not an optional chain.
        if self.peek(1) == Some('.') && !self.peek(2).is_some_and(|c| c.is_ascii_digit()) {
            self.advance_n(2);
            return Ok(self.finish(TokenKind::QuestionDot, String::from("?."), start, newline));
        }

        Ok(self.single(TokenKind::Question, start, newline))
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(c) = self.at() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.advance();
        }
    }

    fn read_number(&mut self, start: Position, newline: bool) -> Result<Token, Error> {
        let mut text = String::new();

        if self.at() == Some('0') {
            text.push('0');
            self.advance();
            // Radix prefixes and legacy octal are not part of the grammar.
            if self.at().is_some_and(|c| {
                c.is_ascii_digit() || matches!(c, 'x' | 'X' | 'b' | 'B' | 'o' | 'O' | '_')
            }) {
                text.push(self.at().unwrap_or_default());
                return Err(self.error(ErrorImpl::NumberParseError { token: text }, start));
            }
        } else {
            self.read_digits(&mut text);
        }

        if self.at() == Some('.') {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        if matches!(self.at(), Some('e') | Some('E')) {
            let sign = matches!(self.peek(1), Some('+') | Some('-'));
            let digit_at = if sign { 2 } else { 1 };
            if self.peek(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.advance_n(digit_at);
                text.push('e');
                if sign {
                    text.push(self.chars[self.state.pos - 1]);
                }
                self.read_digits(&mut text);
            }
        }

        if self.at().is_some_and(is_identifier_char) {
            text.push(self.at().unwrap_or_default());
            return Err(self.error(ErrorImpl::NumberParseError { token: text }, start));
        }

        Ok(self.finish(TokenKind::Number, text, start, newline))
    }

    fn read_string(&mut self, quote: char, start: Position, newline: bool) -> Result<Token, Error> {
        self.advance();
        let mut value = String::new();

        loop {
            match self.at() {
                None => return Err(self.error(ErrorImpl::UnterminatedString, start)),
                Some(c) if c == '\n' || c == '\r' => {
                    return Err(self.error(ErrorImpl::UnterminatedString, start))
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    self.read_escape(&mut value, start)?;
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(self.finish(TokenKind::String, value, start, newline))
    }

    /// Reads template text up to the closing backtick or the next `${`.
    /// The opening delimiter (`` ` `` or `}`) has already been consumed.
    fn read_template_segment(&mut self, start: Position, newline: bool, head: bool) -> Result<Token, Error> {
        let mut value = String::new();

        loop {
            match self.at() {
                None => return Err(self.error(ErrorImpl::UnterminatedTemplate, start)),
                Some('`') => {
                    self.advance();
                    let kind = if head {
                        TokenKind::TemplateString
                    } else {
                        TokenKind::TemplateTail
                    };
                    return Ok(self.finish(kind, value, start, newline));
                }
                Some('$') if self.peek(1) == Some('{') => {
                    self.advance_n(2);
                    self.state.braces.push(BraceKind::Template);
                    let kind = if head {
                        TokenKind::TemplateHead
                    } else {
                        TokenKind::TemplateMiddle
                    };
                    return Ok(self.finish(kind, value, start, newline));
                }
                Some('\\') => {
                    self.advance();
                    self.read_escape(&mut value, start)?;
                }
                Some('\r') => {
                    // Template values normalise line endings to `\n`.
                    self.advance();
                    if self.at() == Some('\n') {
                        self.advance();
                    }
                    value.push('\n');
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Resolves the escape sequence after a backslash into `out`.
    fn read_escape(&mut self, out: &mut String, start: Position) -> Result<(), Error> {
        let c = match self.advance() {
            Some(c) => c,
            None => return Err(self.error(ErrorImpl::UnterminatedString, start)),
        };

        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.at().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.read_hex_digits(2, "x")?;
                out.push(self.code_point(code, "x")?);
            }
            'u' => {
                let code = if self.at() == Some('{') {
                    self.advance();
                    let mut hex = String::new();
                    while let Some(c) = self.at() {
                        if c == '}' {
                            break;
                        }
                        hex.push(c);
                        self.advance();
                    }
                    if self.advance() != Some('}') || hex.is_empty() {
                        return Err(self.invalid_escape(format!("u{{{}", hex)));
                    }
                    u32::from_str_radix(&hex, 16)
                        .map_err(|_| self.invalid_escape(format!("u{{{}}}", hex)))?
                } else {
                    self.read_hex_digits(4, "u")?
                };
                out.push(self.code_point(code, "u")?);
            }
            // Line continuation.
            '\r' => {
                if self.at() == Some('\n') {
                    self.advance();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            c if c.is_ascii_digit() => return Err(self.invalid_escape(c.to_string())),
            // `\\`, `\'`, `\"`, `` \` ``, `\$` and any other character stand for themselves.
            c => out.push(c),
        }

        Ok(())
    }

    fn read_hex_digits(&mut self, count: usize, prefix: &str) -> Result<u32, Error> {
        let mut hex = String::new();
        for _ in 0..count {
            match self.at() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.advance();
                }
                _ => return Err(self.invalid_escape(format!("{}{}", prefix, hex))),
            }
        }

        u32::from_str_radix(&hex, 16).map_err(|_| self.invalid_escape(format!("{}{}", prefix, hex)))
    }

    fn code_point(&self, code: u32, prefix: &str) -> Result<char, Error> {
        char::from_u32(code).ok_or_else(|| self.invalid_escape(format!("{}{:x}", prefix, code)))
    }

    fn invalid_escape(&self, sequence: String) -> Error {
        self.error(ErrorImpl::InvalidEscape { sequence }, self.state.position)
    }

    fn read_private_name(&mut self, start: Position, newline: bool) -> Result<Token, Error> {
        self.advance();
        let mut name = String::new();
        while let Some(c) = self.at() {
            if !is_identifier_char(c) {
                break;
            }
            name.push(c);
            self.advance();
        }

        if !IDENTIFIER_PATTERN.is_match(&name) {
            return Err(self.error(
                ErrorImpl::UnrecognisedToken {
                    token: format!("#{}", name),
                },
                start,
            ));
        }

        Ok(self.finish(TokenKind::PrivateName, name, start, newline))
    }

    /// Reads up to the next delimiter and classifies the word.
    fn read_word(&mut self, start: Position, newline: bool) -> Result<Token, Error> {
        let mut word = String::new();
        while let Some(c) = self.at() {
            if is_delimiter(c) {
                break;
            }
            word.push(c);
            self.advance();
        }

        if let Some(kind) = RESERVED_LOOKUP.get(word.as_str()) {
            return Ok(self.finish(*kind, word, start, newline));
        }

        if !IDENTIFIER_PATTERN.is_match(&word) {
            return Err(self.error(ErrorImpl::UnrecognisedToken { token: word }, start));
        }

        Ok(self.finish(TokenKind::Identifier, word, start, newline))
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace()
        || OPERATOR_LOOKUP.contains_key(&c)
        || matches!(
            c,
            '{' | '}' | '(' | ')' | '[' | ']' | ';' | ',' | ':' | '?' | '\'' | '"' | '`' | '#'
        )
}

/// Tokenizes a complete source text. The last token is always `EOF`.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token()?.clone();
        let at_end = token.kind == TokenKind::EOF;
        tokens.push(token);
        if at_end {
            break;
        }
    }

    Ok(tokens)
}
