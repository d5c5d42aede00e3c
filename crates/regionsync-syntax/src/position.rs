//! Conversion from Tree-sitter points to display coordinates.

/// Converts a zero-based Tree-sitter point to one-based line and column.
///
/// Columns count bytes, matching Tree-sitter.
#[must_use]
pub(crate) fn point_to_one_based(point: tree_sitter::Point) -> (u32, u32) {
    let line = u32::try_from(point.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(point.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}
