use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("function", TokenKind::Function);
        map.insert("class", TokenKind::Class);
        map.insert("extends", TokenKind::Extends);
        map.insert("async", TokenKind::Async);
        map.insert("await", TokenKind::Await);
        map.insert("yield", TokenKind::Yield);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("throw", TokenKind::Throw);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("finally", TokenKind::Finally);
        map.insert("new", TokenKind::New);
        map.insert("delete", TokenKind::Delete);
        map.insert("typeof", TokenKind::Typeof);
        map.insert("void", TokenKind::Void);
        map.insert("instanceof", TokenKind::Instanceof);
        map.insert("in", TokenKind::In);
        map.insert("this", TokenKind::This);
        map.insert("super", TokenKind::Super);
        map.insert("import", TokenKind::Import);
        map.insert("export", TokenKind::Export);
        map.insert("debugger", TokenKind::Debugger);
        map.insert("with", TokenKind::With);
        map.insert("enum", TokenKind::Enum);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map.insert("null", TokenKind::Null);
        map.insert("undefined", TokenKind::Undefined);
        map
    };

    /// Operator candidates per starting character, longest first so the
    /// first match is the maximal munch.
    pub static ref OPERATOR_LOOKUP: HashMap<char, Vec<(&'static str, TokenKind)>> = {
        let mut map = HashMap::new();
        map.insert('+', vec![
            ("++", TokenKind::PlusPlus),
            ("+=", TokenKind::PlusEquals),
            ("+", TokenKind::Plus),
        ]);
        map.insert('-', vec![
            ("--", TokenKind::MinusMinus),
            ("-=", TokenKind::MinusEquals),
            ("-", TokenKind::Dash),
        ]);
        map.insert('*', vec![
            ("**=", TokenKind::StarStarEquals),
            ("**", TokenKind::StarStar),
            ("*=", TokenKind::StarEquals),
            ("*", TokenKind::Star),
        ]);
        map.insert('/', vec![
            ("/=", TokenKind::SlashEquals),
            ("/", TokenKind::Slash),
        ]);
        map.insert('%', vec![
            ("%=", TokenKind::PercentEquals),
            ("%", TokenKind::Percent),
        ]);
        map.insert('<', vec![
            ("<<=", TokenKind::ShiftLeftEquals),
            ("<<", TokenKind::ShiftLeft),
            ("<=", TokenKind::LessEquals),
            ("<", TokenKind::Less),
        ]);
        map.insert('>', vec![
            (">>>=", TokenKind::UnsignedShiftRightEquals),
            (">>>", TokenKind::UnsignedShiftRight),
            (">>=", TokenKind::ShiftRightEquals),
            (">>", TokenKind::ShiftRight),
            (">=", TokenKind::GreaterEquals),
            (">", TokenKind::Greater),
        ]);
        map.insert('=', vec![
            ("===", TokenKind::StrictEquals),
            ("==", TokenKind::Equals),
            ("=>", TokenKind::Arrow),
            ("=", TokenKind::Assignment),
        ]);
        map.insert('!', vec![
            ("!==", TokenKind::StrictNotEquals),
            ("!=", TokenKind::NotEquals),
            ("!", TokenKind::Not),
        ]);
        map.insert('&', vec![
            ("&&=", TokenKind::AndEquals),
            ("&&", TokenKind::And),
            ("&=", TokenKind::AmpersandEquals),
            ("&", TokenKind::Ampersand),
        ]);
        map.insert('|', vec![
            ("||=", TokenKind::OrEquals),
            ("||", TokenKind::Or),
            ("|=", TokenKind::PipeEquals),
            ("|", TokenKind::Pipe),
        ]);
        map.insert('^', vec![
            ("^=", TokenKind::CaretEquals),
            ("^", TokenKind::Caret),
        ]);
        map.insert('~', vec![("~", TokenKind::Tilde)]);
        map.insert('.', vec![
            ("...", TokenKind::Ellipsis),
            (".", TokenKind::Dot),
        ]);
        map
    };

    pub static ref IDENTIFIER_PATTERN: Regex =
        Regex::new(r"^[\p{L}\p{Nl}$_][\p{L}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}$_\x{200C}\x{200D}]*$")
            .expect("identifier pattern is valid");
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    /// A template without substitutions: `` `abc` ``
    TemplateString,
    /// `` `abc${ ``
    TemplateHead,
    /// `}abc${`
    TemplateMiddle,
    /// `` }abc` ``
    TemplateTail,
    Identifier,
    /// `#name`, the value holds the name without the `#`.
    PrivateName,
    Boolean,
    Null,
    Undefined,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Semicolon,
    Comma,
    Colon,
    Tilde,

    Dot,
    Ellipsis,
    QuestionDot,
    Question,
    Arrow, // =>

    Assignment,      // =
    Equals,          // ==
    StrictEquals,    // ===
    Not,             // !
    NotEquals,       // !=
    StrictNotEquals, // !==

    Less,
    LessEquals,
    ShiftLeft,
    ShiftLeftEquals,
    Greater,
    GreaterEquals,
    ShiftRight,
    ShiftRightEquals,
    UnsignedShiftRight,
    UnsignedShiftRightEquals,

    Plus,
    PlusPlus,
    PlusEquals,
    Dash,
    MinusMinus,
    MinusEquals,
    Star,
    StarEquals,
    StarStar,
    StarStarEquals,
    Slash,
    SlashEquals,
    Percent,
    PercentEquals,

    Ampersand,
    And,
    AmpersandEquals,
    AndEquals,
    Pipe,
    Or,
    PipeEquals,
    OrEquals,
    Caret,
    CaretEquals,

    // Reserved
    Var,
    Let,
    Const,
    Function,
    Class,
    Extends,
    Async,
    Await,
    Yield,
    Return,
    If,
    Else,
    For,
    While,
    Do,
    Break,
    Continue,
    Switch,
    Case,
    Default,
    Throw,
    Try,
    Catch,
    Finally,
    New,
    Delete,
    Typeof,
    Void,
    Instanceof,
    In,
    This,
    Super,
    Import,
    Export,
    Debugger,
    With,
    Enum,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Class
                | TokenKind::Extends
                | TokenKind::Async
                | TokenKind::Await
                | TokenKind::Yield
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::Throw
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::New
                | TokenKind::Delete
                | TokenKind::Typeof
                | TokenKind::Void
                | TokenKind::Instanceof
                | TokenKind::In
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::Import
                | TokenKind::Export
                | TokenKind::Debugger
                | TokenKind::With
                | TokenKind::Enum
        )
    }

    /// Any word-shaped token. Words are valid property names after `.` and
    /// inside object literals and classes.
    pub fn is_word(&self) -> bool {
        self.is_keyword()
            || matches!(
                self,
                TokenKind::Identifier | TokenKind::Boolean | TokenKind::Null | TokenKind::Undefined
            )
    }

    pub fn is_template_start(&self) -> bool {
        matches!(self, TokenKind::TemplateString | TokenKind::TemplateHead)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Cooked text: string and template contents have escapes resolved and
    /// delimiters removed.
    pub value: String,
    /// The exact source text of the token.
    pub raw: String,
    pub span: Span,
    /// Whether a line terminator appears between this token and the previous one.
    pub newline_before: bool,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Whether this is an `Identifier` token spelled `word`.
    pub fn is_contextual(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.value == word
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::PrivateName,
        ]) {
            format!("{} ({})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
