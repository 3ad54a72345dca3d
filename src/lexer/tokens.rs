use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Int);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("read", TokenKind::Read);
        map.insert("write", TokenKind::Write);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Comma,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Int,
    Bool,
    Void,
    True,
    False,
    If,
    Else,
    While,
    Return,
    Read,
    Write,
}

impl TokenKind {
    /// Whether the token starts a type (`int`, `bool`, `void`).
    pub fn is_type_keyword(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Bool | TokenKind::Void)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if matches!(self.kind, TokenKind::Identifier | TokenKind::Number) {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
