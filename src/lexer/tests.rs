//! Unit tests for the lexer module.
//!
//! Covers keywords, identifiers, integer literals, operators and
//! punctuation, comments, spans and error cases.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.lake".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("int bool void true false if else while return read write");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Int,
            TokenKind::Bool,
            TokenKind::Void,
            TokenKind::True,
            TokenKind::False,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::Read,
            TokenKind::Write,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore integer".to_string();
    let tokens = tokenize(source, Some("test.lake".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    // Keywords only match whole words
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "integer");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 1000".to_string();
    let tokens = tokenize(source, Some("test.lake".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "1000");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("+ ++ - -- * / = == ! != < <= > >= && ||");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Plus,
            TokenKind::PlusPlus,
            TokenKind::Dash,
            TokenKind::MinusMinus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::Not,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = kinds("{ } ( ) ; ,");

    assert_eq!(
        tokens,
        vec![
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_without_whitespace() {
    let tokens = kinds("x++;y=*p+1;");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Identifier,
            TokenKind::PlusPlus,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Star,
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = kinds("int a; // trailing comment\n// whole line\nbool b;");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Bool,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_spans() {
    let source = "int  value;".to_string();
    let tokens = tokenize(source, Some("test.lake".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 10);
    assert_eq!(*tokens[1].span.start.1, "test.lake");
    assert_eq!(tokens[3].span.start.0, 11);
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t "), vec![TokenKind::EOF]);
}

#[test]
fn test_unrecognised_token() {
    let result = tokenize("int a = #;".to_string(), Some("test.lake".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x".to_string(), None).unwrap();

    assert_eq!(*tokens[0].span.start.1, "shell");
}
