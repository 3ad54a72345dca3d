#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod resolver;
pub mod type_checker;

extern crate regex;

pub use driver::{check_source, Checked, FrontEndError};

/// Byte offset into a source file, tagged with the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the full line text and the column offset
/// of `position` within that line. A position exactly at the end of the
/// source maps to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => Some((line_number - 1, last.to_string(), last.len())),
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders an error against the source it was reported in.
///
/// ```text
/// Error: BadMathOperand (Arithmetic operands must be int or pointer, found `bool`)
/// -> main.lake:2:5
///   |
/// 2 | a + true;
///   | ----^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        out.push_str(&format!("-> {}\n", position.1));
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("-> {}:{}:{}\n", position.1, line, line_pos + 1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}
