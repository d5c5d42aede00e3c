//! String and character literal scanning.
//!
//! Literals are consumed whole so that `//`, `#` or quotes inside them are
//! never mistaken for trivia. Interpolation holes are scanned recursively,
//! including nested literals.

use super::cursor::Cursor;

/// Consumes a literal at the cursor. Returns `false`, leaving the cursor
/// untouched, when no literal starts here.
pub(super) fn scan_literal(cursor: &mut Cursor<'_>) -> bool {
    if cursor.peek() == Some('\'') {
        scan_char(cursor);
        return true;
    }

    let Some(prefix) = StringPrefix::read(cursor.rest()) else {
        return false;
    };
    cursor.advance(prefix.len);

    let quotes = cursor.rest().chars().take_while(|&ch| ch == '"').count();
    if quotes >= 3 {
        cursor.advance(quotes);
        scan_raw_body(cursor, quotes);
    } else {
        cursor.advance(1);
        if prefix.verbatim {
            scan_verbatim_body(cursor, prefix.interpolated);
        } else {
            scan_regular_body(cursor, prefix.interpolated);
        }
    }
    true
}

/// The `$`/`@` run in front of an opening quote.
struct StringPrefix {
    len: usize,
    interpolated: bool,
    verbatim: bool,
}

impl StringPrefix {
    fn read(rest: &str) -> Option<Self> {
        let mut dollars = 0_usize;
        let mut verbatim = false;
        for (offset, ch) in rest.char_indices() {
            match ch {
                '$' => dollars += 1,
                '@' if !verbatim => verbatim = true,
                '"' => {
                    return Some(Self {
                        len: offset,
                        interpolated: dollars > 0,
                        verbatim,
                    });
                }
                _ => return None,
            }
        }
        None
    }
}

fn scan_char(cursor: &mut Cursor<'_>) {
    cursor.bump();
    while let Some(ch) = cursor.peek() {
        match ch {
            '\\' => {
                cursor.bump();
                cursor.bump();
            }
            '\'' => {
                cursor.bump();
                return;
            }
            '\n' | '\r' => return,
            _ => {
                cursor.bump();
            }
        }
    }
}

fn scan_regular_body(cursor: &mut Cursor<'_>, interpolated: bool) {
    while let Some(ch) = cursor.peek() {
        match ch {
            '\\' => {
                cursor.bump();
                cursor.bump();
            }
            '"' => {
                cursor.bump();
                return;
            }
            '\n' | '\r' => return,
            '{' if interpolated => scan_brace(cursor),
            _ => {
                cursor.bump();
            }
        }
    }
}

fn scan_verbatim_body(cursor: &mut Cursor<'_>, interpolated: bool) {
    while let Some(ch) = cursor.peek() {
        match ch {
            '"' => {
                cursor.bump();
                if cursor.peek() != Some('"') {
                    return;
                }
                cursor.bump();
            }
            '{' if interpolated => scan_brace(cursor),
            _ => {
                cursor.bump();
            }
        }
    }
}

fn scan_raw_body(cursor: &mut Cursor<'_>, quotes: usize) {
    let closing = "\"".repeat(quotes);
    while !cursor.is_eof() {
        if cursor.starts_with(&closing) {
            cursor.advance(quotes);
            return;
        }
        cursor.bump();
    }
}

/// Handles `{` inside an interpolated string: `{{` is an escape, anything
/// else opens a hole.
fn scan_brace(cursor: &mut Cursor<'_>) {
    if cursor.peek_nth(1) == Some('{') {
        cursor.advance(2);
        return;
    }
    cursor.bump();
    scan_hole(cursor);
}

fn scan_hole(cursor: &mut Cursor<'_>) {
    let mut depth = 1_usize;
    while let Some(ch) = cursor.peek() {
        if scan_literal(cursor) {
            continue;
        }
        cursor.bump();
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}
