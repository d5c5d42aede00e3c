//! Trivia-preserving C# lexer.
//!
//! The lexer splits source text into tokens and attaches every byte that is
//! not part of a token to one of them as trivia. Concatenating the tokens in
//! order, with their trivia, reproduces the input exactly. A synthetic empty
//! token terminates the stream and owns any trivia after the last real
//! token.
//!
//! Token classification is deliberately coarse: identifiers, numbers,
//! literals and single-character punctuation. Declarations are recognised by
//! the tree-sitter front-end; the lexer only has to agree with it on where
//! tokens start.

mod cursor;
mod literals;
mod trivia;

use cursor::Cursor;

use crate::token::Token;

/// Splits `source` into tokens with attached trivia.
pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    let mut leading = trivia::scan_leading(&mut cursor, true);

    while !cursor.is_eof() {
        let text = scan_token(&mut cursor).to_owned();
        let trailing = trivia::scan_trailing(&mut cursor);
        let token = Token::new(text, leading, trailing);
        let at_line_start = token.ends_line();
        tokens.push(token);
        leading = trivia::scan_leading(&mut cursor, at_line_start);
    }

    tokens.push(Token::new(String::new(), leading, Vec::new()));
    tokens
}

/// Consumes one token. Always advances while input remains.
fn scan_token<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    let start = cursor.position();
    let Some(first) = cursor.peek() else {
        return "";
    };

    if literals::scan_literal(cursor) {
        return cursor.slice_from(start);
    }

    if first == '@' && cursor.peek_nth(1).is_some_and(is_identifier_start) {
        cursor.bump();
        cursor.eat_while(is_identifier_part);
    } else if is_identifier_start(first) {
        cursor.eat_while(is_identifier_part);
    } else if first.is_ascii_digit()
        || (first == '.' && cursor.peek_nth(1).is_some_and(|ch| ch.is_ascii_digit()))
    {
        scan_number(cursor);
    } else {
        cursor.bump();
    }
    cursor.slice_from(start)
}

fn scan_number(cursor: &mut Cursor<'_>) {
    while let Some(ch) = cursor.peek() {
        let continues = ch.is_alphanumeric()
            || ch == '_'
            || (ch == '.' && cursor.peek_nth(1).is_some_and(|next| next.is_ascii_digit()));
        if !continues {
            break;
        }
        cursor.bump();
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivia::Trivia;
    use rstest::rstest;

    fn render(tokens: &[Token]) -> String {
        let mut out = String::new();
        for token in tokens {
            token.write_to(&mut out);
        }
        out
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .iter()
            .map(|token| token.text().to_owned())
            .collect()
    }

    #[rstest]
    #[case("")]
    #[case("class C { }")]
    #[case("  #region +Foo\r\n  public void Foo() { }\r\n  #endregion\r\n")]
    #[case("var s = $\"a {x + \"}\"} b\"; // tail\n")]
    #[case("/* unterminated")]
    #[case("var raw = \"\"\"\n  # not a directive\n  \"\"\";\n#endif")]
    #[case("\u{FEFF}using System;\n")]
    fn rendering_reproduces_input(#[case] source: &str) {
        assert_eq!(render(&tokenize(source)), source);
    }

    #[test]
    fn stream_ends_with_empty_token_owning_final_trivia() {
        let tokens = tokenize("int x;\n\n// done\n");
        let last = tokens.last().expect("end of file token");
        assert!(last.is_end_of_file());
        assert_eq!(
            last.leading(),
            [
                Trivia::EndOfLine("\n".to_owned()),
                Trivia::LineComment("// done".to_owned()),
                Trivia::EndOfLine("\n".to_owned()),
            ]
        );
    }

    #[test]
    fn trailing_trivia_stops_after_first_line_break() {
        let tokens = tokenize("a; // note\n  b");
        let semicolon = tokens.get(1).expect("semicolon");
        assert_eq!(semicolon.text(), ";");
        assert_eq!(
            semicolon.trailing(),
            [
                Trivia::Whitespace(" ".to_owned()),
                Trivia::LineComment("// note".to_owned()),
                Trivia::EndOfLine("\n".to_owned()),
            ]
        );
        let next = tokens.get(2).expect("identifier");
        assert_eq!(next.leading(), [Trivia::Whitespace("  ".to_owned())]);
    }

    #[test]
    fn directives_are_leading_trivia() {
        let tokens = tokenize("{\n    #region -Foo\n    void Foo() { }\n}");
        let void = tokens.get(1).expect("void");
        assert_eq!(void.text(), "void");
        let names: Vec<_> = void
            .leading()
            .iter()
            .filter_map(|item| item.as_region().map(|marker| marker.name().to_owned()))
            .collect();
        assert_eq!(names, ["-Foo"]);
    }

    #[test]
    fn hash_after_code_is_not_a_directive() {
        let tokens = tokenize("a #region x\n");
        assert!(tokens.iter().all(|token| token.leading().iter().all(|item| item.as_region().is_none())));
        assert_eq!(texts("a #region x\n"), ["a", "#", "region", "x", ""]);
    }

    #[rstest]
    #[case("/// summary", true)]
    #[case("//// banner", false)]
    #[case("/** doc */", true)]
    #[case("/**/", false)]
    fn classifies_documentation_comments(#[case] comment: &str, #[case] is_doc: bool) {
        let source = format!("{comment}\nx");
        let tokens = tokenize(&source);
        let first = tokens.first().expect("identifier");
        let item = first.leading().first().expect("comment");
        assert_eq!(matches!(item, Trivia::DocComment(_)), is_doc);
        assert!(item.is_comment());
    }

    #[rstest]
    #[case("x = \"// not a comment\";", "\"// not a comment\"")]
    #[case("x = @\"say \"\"hi\"\"\";", "@\"say \"\"hi\"\"\"")]
    #[case("x = $\"{{literal}} {value}\";", "$\"{{literal}} {value}\"")]
    #[case("x = '\\'';", "'\\''")]
    #[case("x = \"\"\"a \"\" b\"\"\";", "\"\"\"a \"\" b\"\"\"")]
    fn literals_are_single_tokens(#[case] source: &str, #[case] literal: &str) {
        assert!(texts(source).iter().any(|text| text == literal));
    }

    #[test]
    fn verbatim_identifiers_and_numbers() {
        assert_eq!(
            texts("@class = 1.5e3 + .5;"),
            ["@class", "=", "1.5e3", "+", ".5", ";", ""]
        );
    }
}
