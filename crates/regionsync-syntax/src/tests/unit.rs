//! Unit tests for regionsync-syntax.

use rstest::rstest;

use crate::{
    EndRegionMarker, LineEnding, Parser, RegionMarker, SourceTree, Token, TokenId, Trivia,
};

fn whitespace(text: &str) -> Trivia {
    Trivia::Whitespace(text.to_owned())
}

fn eol() -> Trivia {
    Trivia::EndOfLine("\n".to_owned())
}

// =============================================================================
// Source Tree Tests
// =============================================================================

#[rstest]
#[case("class C\n{\n    int X;\n}\n")]
#[case("#if DEBUG\nclass C { }\n#endif\n")]
#[case("  \r\n  // only trivia\r\n")]
fn tree_renders_source_verbatim(#[case] source: &str) {
    let tree = SourceTree::from_source(source);
    assert_eq!(tree.text(), source);
    assert_eq!(tree.text_len(), source.len());
    assert!(tree.token(tree.eof()).is_some_and(Token::is_end_of_file));
}

#[test]
fn offsets_follow_trivia_lengths() {
    let tree = SourceTree::from_source("  a  b\n c");
    let b = tree.first_token_at_or_after(3);
    assert_eq!(tree.token(b).map(Token::text), Some("b"));
    assert_eq!(tree.full_start(b), Some(5));
    assert_eq!(tree.token_start(b), Some(5));
    assert_eq!(tree.token_at(5), Some(b));
    assert_eq!(tree.token_at(4), None);
    assert_eq!(tree.first_token_at_or_after(100), tree.eof());
}

#[test]
fn line_starts_depend_on_previous_token() {
    let tree = SourceTree::from_source("a b\nc");
    let ids: Vec<TokenId> = tree.tokens().map(|(id, _)| id).collect();
    let starts: Vec<bool> = ids.iter().map(|&id| tree.starts_line(id)).collect();
    assert_eq!(starts, [true, false, true, false]);
}

#[test]
fn trivia_edit_returns_new_version_sharing_untouched_tokens() {
    let original = SourceTree::from_source("a\nb\nc\n");
    let b = TokenId::new(1);
    let marker = Trivia::Region(RegionMarker::new("-b", LineEnding::Lf));
    let edited = original
        .with_leading_trivia(b, vec![marker])
        .expect("token exists");

    assert_eq!(original.text(), "a\nb\nc\n");
    assert_eq!(edited.text(), "a\n#region -b\nb\nc\n");
    assert!(edited.shares_token(&original, TokenId::new(0)));
    assert!(edited.shares_token(&original, TokenId::new(2)));
    assert!(!edited.shares_token(&original, b));
    assert_eq!(edited.token_start(TokenId::new(2)), Some(15));
}

#[test]
fn editing_unknown_token_yields_none() {
    let tree = SourceTree::from_source("a");
    assert!(tree.with_leading_trivia(TokenId::new(9), Vec::new()).is_none());
}

#[test]
fn hand_built_tree_gains_end_of_file_token() {
    let tree = SourceTree::from_tokens(vec![Token::new(
        "x".to_owned(),
        vec![
            Trivia::Region(RegionMarker::new("-x", LineEnding::CrLf)),
            whitespace("  "),
        ],
        vec![eol()],
    )]);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.text(), "#region -x\r\n  x\n");
    assert_eq!(tree.line_ending(), Some(LineEnding::CrLf));
}

#[rstest]
#[case("a\r\nb", Some(LineEnding::CrLf))]
#[case("a\nb", Some(LineEnding::Lf))]
#[case("ab", None)]
fn tree_remembers_detected_line_ending(#[case] source: &str, #[case] expected: Option<LineEnding>) {
    assert_eq!(SourceTree::from_source(source).line_ending(), expected);
}

// =============================================================================
// Front-end Agreement Tests
// =============================================================================

#[test]
fn region_markers_land_in_leading_trivia_of_declaration() {
    let mut parser = Parser::new().expect("parser init");
    let file = parser
        .parse("class C\n{\n    #region +Foo\n    public void Foo() { }\n    #endregion\n}\n")
        .expect("parse");
    let decl = file.declarations().get(0).expect("Foo");
    let first = file.tree().token(decl.first_token()).expect("first token");
    let next = file.tree().token(decl.next_token()).expect("next token");

    assert_eq!(first.text(), "public");
    assert!(first.leading().iter().any(|item| item.as_region().is_some_and(|m| m.name() == "+Foo")));
    assert!(next.leading().iter().any(|item| matches!(item, Trivia::EndRegion(_))));
    assert_eq!(next.text(), "}");
}

#[test]
fn members_inside_conditional_blocks_are_indexed() {
    let mut parser = Parser::new().expect("parser init");
    let file = parser
        .parse("class C\n{\n#if DEBUG\n    void Trace() { }\n#endif\n}\n")
        .expect("parse");
    let decl = file.declarations().get(0).expect("Trace");
    let next = file.tree().token(decl.next_token()).expect("next token");
    assert!(next.leading().iter().any(|item| matches!(item, Trivia::Directive(d) if d.text() == "#endif")));
}

#[test]
fn fresh_markers_render_with_requested_line_ending() {
    let tree = SourceTree::from_tokens(vec![Token::new(
        "x".to_owned(),
        vec![Trivia::EndRegion(EndRegionMarker::new(LineEnding::Lf))],
        Vec::new(),
    )]);
    assert_eq!(tree.text(), "#endregion\nx");
}
