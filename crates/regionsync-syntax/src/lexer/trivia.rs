//! Trivia scanning.
//!
//! Trailing trivia runs up to and including the first line break after a
//! token. Everything else between two tokens is leading trivia of the
//! second. Directives are only recognised when `#` is the first
//! non-blank character of a line.

use super::cursor::Cursor;
use crate::trivia::{Directive, EndRegionMarker, RegionMarker, Trivia};

pub(super) fn is_horizontal_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\n' && ch != '\r') || ch == '\u{FEFF}'
}

fn starts_comment(cursor: &Cursor<'_>) -> bool {
    cursor.starts_with("//") || cursor.starts_with("/*")
}

/// Scans leading trivia. `at_line_start` reports whether the cursor sits at
/// the start of a line, which enables directive recognition.
pub(super) fn scan_leading(cursor: &mut Cursor<'_>, mut at_line_start: bool) -> Vec<Trivia> {
    let mut items = Vec::new();
    while let Some(ch) = cursor.peek() {
        match ch {
            '\n' | '\r' => {
                items.push(Trivia::EndOfLine(scan_line_break(cursor).to_owned()));
                at_line_start = true;
            }
            blank if is_horizontal_whitespace(blank) => {
                let text = cursor.eat_while(is_horizontal_whitespace);
                items.push(Trivia::Whitespace(text.to_owned()));
            }
            '#' if at_line_start => {
                let directive = scan_directive(cursor);
                at_line_start = directive.ends_line();
                items.push(directive);
            }
            '/' if starts_comment(cursor) => {
                items.push(scan_comment(cursor));
                at_line_start = false;
            }
            _ => break,
        }
    }
    items
}

/// Scans trailing trivia, stopping after the first line break.
pub(super) fn scan_trailing(cursor: &mut Cursor<'_>) -> Vec<Trivia> {
    let mut items = Vec::new();
    while let Some(ch) = cursor.peek() {
        match ch {
            '\n' | '\r' => {
                items.push(Trivia::EndOfLine(scan_line_break(cursor).to_owned()));
                break;
            }
            blank if is_horizontal_whitespace(blank) => {
                let text = cursor.eat_while(is_horizontal_whitespace);
                items.push(Trivia::Whitespace(text.to_owned()));
            }
            '/' if starts_comment(cursor) => items.push(scan_comment(cursor)),
            _ => break,
        }
    }
    items
}

/// Consumes `\r\n`, `\n` or `\r`; returns the empty string elsewhere.
fn scan_line_break<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    let start = cursor.position();
    if cursor.starts_with("\r\n") {
        cursor.advance(2);
    } else if matches!(cursor.peek(), Some('\n' | '\r')) {
        cursor.advance(1);
    }
    cursor.slice_from(start)
}

fn scan_comment(cursor: &mut Cursor<'_>) -> Trivia {
    let rest = cursor.rest();
    if rest.starts_with("//") {
        let text = cursor.eat_while(|ch| ch != '\n' && ch != '\r');
        let is_doc = text.starts_with("///") && !text.starts_with("////");
        return if is_doc {
            Trivia::DocComment(text.to_owned())
        } else {
            Trivia::LineComment(text.to_owned())
        };
    }

    let len = rest
        .get(2..)
        .and_then(|body| body.find("*/"))
        .map_or(rest.len(), |end| end + 4);
    let start = cursor.position();
    cursor.advance(len);
    let text = cursor.slice_from(start);
    let is_doc = text.starts_with("/**") && !text.starts_with("/**/");
    if is_doc {
        Trivia::DocComment(text.to_owned())
    } else {
        Trivia::BlockComment(text.to_owned())
    }
}

fn scan_directive(cursor: &mut Cursor<'_>) -> Trivia {
    let line = cursor.eat_while(|ch| ch != '\n' && ch != '\r');
    let end_of_directive = scan_line_break(cursor);

    let after_hash = line.get(1..).unwrap_or_default();
    let body = after_hash.trim_start_matches(is_horizontal_whitespace);
    let keyword_len = body
        .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .unwrap_or(body.len());
    let split = line.len() - body.len() + keyword_len;
    let keyword = body.get(..keyword_len).unwrap_or_default();
    let head = line.get(..split).unwrap_or_default();
    let rest = line.get(split..).unwrap_or_default();

    match keyword {
        "region" => Trivia::Region(RegionMarker::from_parts(head, rest, end_of_directive)),
        "endregion" => {
            Trivia::EndRegion(EndRegionMarker::from_parts(head, rest, end_of_directive))
        }
        _ => Trivia::Directive(Directive::from_parts(line, end_of_directive)),
    }
}
