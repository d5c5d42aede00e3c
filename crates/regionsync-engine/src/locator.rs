//! Marker pair lookup.
//!
//! A declaration is wrapped when an opening marker is active at the end of
//! its own leading trivia and a closing marker is active at the start of the
//! next token's leading trivia. "Active" follows a cancel-then-restart scan:
//! reading forward, each `#region` becomes the candidate and each
//! `#endregion` drops it; reading the next token's trivia backward, the
//! roles swap. Stray markers anywhere else in the file are ignored.

use regionsync_syntax::{Declaration, SourceTree, Token, TokenId, Trivia};

use crate::error::RegionError;

/// Address of one trivia item: a token and an index into its leading
/// trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriviaRef {
    /// Token owning the trivia.
    pub token: TokenId,
    /// Position inside the token's leading trivia.
    pub index: usize,
}

/// Opening and closing markers bracketing one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    /// The `#region` item in the declaration's leading trivia.
    pub opening: TriviaRef,
    /// The `#endregion` item in the next token's leading trivia.
    pub closing: TriviaRef,
}

/// A marker pair together with the name embedded in its opening marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRegion {
    /// Where the markers live.
    pub pair: MarkerPair,
    /// Embedded name, empty when the opening marker carries none.
    pub name: String,
}

/// Returns the index of the opening marker active after scanning `trivia`
/// forward.
#[must_use]
pub fn active_opening(trivia: &[Trivia]) -> Option<usize> {
    trivia
        .iter()
        .enumerate()
        .fold(None, |candidate, (index, item)| match item {
            Trivia::Region(_) => Some(index),
            Trivia::EndRegion(_) => None,
            _ => candidate,
        })
}

/// Returns the index of the closing marker active after scanning `trivia`
/// backward, nearest to the owning token first.
#[must_use]
pub fn active_closing(trivia: &[Trivia]) -> Option<usize> {
    trivia
        .iter()
        .enumerate()
        .rev()
        .fold(None, |candidate, (index, item)| match item {
            Trivia::EndRegion(_) => Some(index),
            Trivia::Region(_) => None,
            _ => candidate,
        })
}

/// Finds the marker pair wrapping `declaration`.
///
/// Returns `Ok(None)` when the declaration is not wrapped.
///
/// # Errors
///
/// Returns [`RegionError::MalformedDeclaration`] when the declaration's
/// tokens do not belong to `tree`.
pub fn locate(
    tree: &SourceTree,
    declaration: &Declaration,
) -> Result<Option<LocatedRegion>, RegionError> {
    let span = DeclarationSpan::resolve(tree, declaration)?;

    let Some(opening) = active_opening(span.first.leading()) else {
        return Ok(None);
    };
    let Some(closing) = active_closing(span.next.leading()) else {
        return Ok(None);
    };
    let name = span
        .first
        .leading()
        .get(opening)
        .and_then(Trivia::as_region)
        .map(|marker| marker.name().to_owned())
        .unwrap_or_default();

    Ok(Some(LocatedRegion {
        pair: MarkerPair {
            opening: TriviaRef {
                token: declaration.first_token(),
                index: opening,
            },
            closing: TriviaRef {
                token: declaration.next_token(),
                index: closing,
            },
        },
        name,
    }))
}

/// The tokens a declaration's markers attach to, checked against a tree.
pub(crate) struct DeclarationSpan<'a> {
    pub(crate) first: &'a Token,
    pub(crate) last: &'a Token,
    pub(crate) next: &'a Token,
}

impl<'a> DeclarationSpan<'a> {
    pub(crate) fn resolve(
        tree: &'a SourceTree,
        declaration: &Declaration,
    ) -> Result<Self, RegionError> {
        let first_id = declaration.first_token();
        let next_id = declaration.next_token();
        if first_id >= next_id {
            return Err(RegionError::malformed(
                declaration.identifier(),
                format!("first token {first_id} does not precede next token {next_id}"),
            ));
        }
        let token = |id: TokenId| {
            tree.token(id).ok_or_else(|| {
                RegionError::malformed(
                    declaration.identifier(),
                    format!("token {id} is outside a tree of {} tokens", tree.len()),
                )
            })
        };
        Ok(Self {
            first: token(first_id)?,
            last: token(TokenId::new(next_id.index() - 1))?,
            next: token(next_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionsync_syntax::{
        Accessibility, DeclarationKind, EndRegionMarker, LineEnding, RegionMarker,
    };
    use rstest::rstest;

    fn open(name: &str) -> Trivia {
        Trivia::Region(RegionMarker::new(name, LineEnding::Lf))
    }

    fn end() -> Trivia {
        Trivia::EndRegion(EndRegionMarker::new(LineEnding::Lf))
    }

    fn ws() -> Trivia {
        Trivia::Whitespace("    ".to_owned())
    }

    fn tree_with(declaration_leading: Vec<Trivia>, next_leading: Vec<Trivia>) -> SourceTree {
        SourceTree::from_tokens(vec![
            Token::new("void".to_owned(), declaration_leading, Vec::new()),
            Token::new("Foo".to_owned(), Vec::new(), Vec::new()),
            Token::new("}".to_owned(), next_leading, Vec::new()),
        ])
    }

    fn declaration() -> Declaration {
        Declaration::new(
            DeclarationKind::Method,
            Accessibility::Private,
            "Foo",
            TokenId::new(0),
            TokenId::new(2),
        )
    }

    #[rstest]
    #[case(vec![], None)]
    #[case(vec![open("X")], Some(0))]
    #[case(vec![open("X"), end()], None)]
    #[case(vec![open("X"), end(), open("Y")], Some(2))]
    #[case(vec![open("X"), ws(), open("Y"), ws()], Some(2))]
    fn opening_scan_cancels_then_restarts(
        #[case] trivia: Vec<Trivia>,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(active_opening(&trivia), expected);
    }

    #[rstest]
    #[case(vec![], None)]
    #[case(vec![end()], Some(0))]
    #[case(vec![end(), open("Next")], Some(0))]
    #[case(vec![open("X"), end()], None)]
    #[case(vec![end(), ws(), end()], Some(0))]
    fn closing_scan_runs_backward(#[case] trivia: Vec<Trivia>, #[case] expected: Option<usize>) {
        assert_eq!(active_closing(&trivia), expected);
    }

    #[test]
    fn locates_pair_and_name() {
        let tree = tree_with(vec![ws(), open("-Foo"), ws()], vec![ws(), end()]);
        let located = locate(&tree, &declaration())
            .expect("well-formed")
            .expect("wrapped");
        assert_eq!(located.name, "-Foo");
        assert_eq!(located.pair.opening, TriviaRef { token: TokenId::new(0), index: 1 });
        assert_eq!(located.pair.closing, TriviaRef { token: TokenId::new(2), index: 1 });
    }

    #[test]
    fn latest_opening_marker_wins() {
        let tree = tree_with(vec![open("X"), end(), open("Y")], vec![end()]);
        let located = locate(&tree, &declaration()).expect("well-formed");
        assert_eq!(located.map(|region| region.name), Some("Y".to_owned()));
    }

    #[rstest]
    #[case(vec![open("-Foo")], vec![])]
    #[case(vec![], vec![end()])]
    #[case(vec![open("-Foo"), end()], vec![end()])]
    #[case(vec![open("-Foo")], vec![open("-Next"), ws()])]
    fn incomplete_pairs_are_absent(#[case] leading: Vec<Trivia>, #[case] next: Vec<Trivia>) {
        let tree = tree_with(leading, next);
        assert_eq!(locate(&tree, &declaration()).expect("well-formed"), None);
    }

    #[test]
    fn nameless_marker_yields_empty_name() {
        let tree = tree_with(vec![open("")], vec![end()]);
        let located = locate(&tree, &declaration())
            .expect("well-formed")
            .expect("wrapped");
        assert_eq!(located.name, "");
    }

    #[rstest]
    #[case(TokenId::new(2), TokenId::new(2))]
    #[case(TokenId::new(2), TokenId::new(1))]
    #[case(TokenId::new(0), TokenId::new(40))]
    fn rejects_spans_outside_tree(#[case] first: TokenId, #[case] next: TokenId) {
        let tree = tree_with(Vec::new(), Vec::new());
        let declaration =
            Declaration::new(DeclarationKind::Method, Accessibility::Public, "Foo", first, next);
        let error = locate(&tree, &declaration).expect_err("malformed");
        assert!(matches!(error, RegionError::MalformedDeclaration { .. }));
    }
}
