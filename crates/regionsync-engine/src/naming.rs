//! Canonical region names.

use regionsync_syntax::Accessibility;

/// Returns the region name expected around a member: the accessibility
/// prefix followed by the identifier.
#[must_use]
pub fn canonical_name(accessibility: Accessibility, identifier: &str) -> String {
    let prefix = accessibility.marker_prefix();
    let mut name = String::with_capacity(prefix.len() + identifier.len());
    name.push_str(prefix);
    name.push_str(identifier);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Accessibility::Public, "+Foo")]
    #[case(Accessibility::Protected, "#Foo")]
    #[case(Accessibility::Internal, "~Foo")]
    #[case(Accessibility::ProtectedOrInternal, "#~Foo")]
    #[case(Accessibility::ProtectedAndInternal, "-Foo")]
    #[case(Accessibility::Private, "-Foo")]
    fn prefixes_identifier(#[case] accessibility: Accessibility, #[case] expected: &str) {
        assert_eq!(canonical_name(accessibility, "Foo"), expected);
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(
            canonical_name(Accessibility::Internal, "Count"),
            canonical_name(Accessibility::Internal, "Count")
        );
    }
}
