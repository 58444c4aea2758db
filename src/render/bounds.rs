//! Structure detection over raw dumb-terminal output.
//!
//! Nothing here fails: a pass that finds no qualifying rows returns `None`
//! and the dependent rewrite is skipped.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    core::constants::{MIN_BOX_ROW_WIDTH, TICK_DIGIT_WINDOW, TICK_MAX_SPACES, VERTICAL_BORDER},
    render::grid::{CharacterGrid, first_column, last_column, width},
};

/// Inclusive row range of the plot box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowExtent {
    pub first: usize,
    pub last: usize,
}

impl RowExtent {
    #[inline]
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        (self.first..=self.last).contains(&row)
    }
    /// Distance between first and last row.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.last - self.first
    }
}

/// Row extent plus the border columns of a representative row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub rows: RowExtent,
    pub left: usize,
    pub right: usize,
}

impl BoundingBox {
    /// Columns strictly between the two borders.
    #[inline]
    #[must_use]
    pub fn rule_len(&self) -> usize {
        self.right.saturating_sub(self.left + 1)
    }
}

/// First and last rows carrying a y-axis tick label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickRows {
    pub first: usize,
    pub last: usize,
}

// --- Box ---

/// Rows containing a vertical border and wider than [`MIN_BOX_ROW_WIDTH`].
#[must_use]
pub fn vertical_extent(grid: &CharacterGrid) -> Option<RowExtent> {
    let mut hits = grid
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.contains(VERTICAL_BORDER) && width(row) > MIN_BOX_ROW_WIDTH)
        .map(|(i, _)| i);

    let first = hits.next()?;
    let last = hits.last().unwrap_or(first);
    Some(RowExtent { first, last })
}

/// Border columns taken from the first row of `extent` that has any.
#[must_use]
pub fn border_columns(grid: &CharacterGrid, extent: RowExtent) -> Option<(usize, usize)> {
    grid.rows()
        .get(extent.first..=extent.last)?
        .iter()
        .find_map(|row| {
            Some((
                first_column(row, VERTICAL_BORDER)?,
                last_column(row, VERTICAL_BORDER)?,
            ))
        })
}

#[must_use]
pub fn bounding_box(grid: &CharacterGrid) -> Option<BoundingBox> {
    let rows = vertical_extent(grid)?;
    let (left, right) = border_columns(grid, rows)?;
    Some(BoundingBox { rows, left, right })
}

// --- Ticks ---

fn x_scale_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+\s+\d+\s+\d+").expect("valid regex"))
}

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([0-9.e+\-\s]+)").expect("valid regex"))
}

/// Does this row start with a y-axis tick label?
///
/// Scientific labels (`1.5e 07` once dashes are blanked) always qualify.
/// Plain labels qualify only on rows with at most two embedded spaces that do
/// not look like an x-axis ruler (`0 1 2 ...`).
#[must_use]
pub fn is_tick_row(row: &str) -> bool {
    let t = row.trim();
    if !t.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    if t.contains("e ") || t.contains("e+") || t.contains("e-") {
        return true;
    }
    t.matches(' ').count() <= TICK_MAX_SPACES
        && t.chars().take(TICK_DIGIT_WINDOW).any(|c| c.is_ascii_digit())
        && !x_scale_re().is_match(t)
}

/// Scan the whole grid for the first and last tick rows.
#[must_use]
pub fn tick_rows(grid: &CharacterGrid) -> Option<TickRows> {
    let mut hits = grid
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| is_tick_row(row))
        .map(|(i, _)| i);

    let first = hits.next()?;
    let last = hits.last().unwrap_or(first);
    Some(TickRows { first, last })
}

/// Leading numeric run of a row, trimmed.
#[must_use]
pub fn leading_number(row: &str) -> Option<&str> {
    let caps = leading_number_re().captures(row)?;
    let text = caps.get(1)?.as_str().trim();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(label: &str, inner: usize) -> String {
        format!("{label:>8} |{}|", " ".repeat(inner))
    }

    #[test]
    fn extent_ignores_short_rows() {
        let g = CharacterGrid::from_rows([
            "  title".to_owned(),
            "short | row".to_owned(),
            boxed("", 60),
            boxed("", 60),
            boxed("", 60),
            "  0   1   2".to_owned(),
        ]);
        assert_eq!(vertical_extent(&g), Some(RowExtent { first: 2, last: 4 }));
    }

    #[test]
    fn no_border_rows_means_no_box() {
        let g = CharacterGrid::from_rows(["nothing here", "| tiny |"]);
        assert_eq!(bounding_box(&g), None);
    }

    #[test]
    fn box_columns_come_from_first_box_row() {
        let g = CharacterGrid::from_rows([boxed("", 60), boxed("", 60)]);
        let b = bounding_box(&g).unwrap();
        assert_eq!(b.left, 9);
        assert_eq!(b.right, 70);
        assert_eq!(b.rule_len(), 60);
        assert_eq!(b.rows.height(), 1);
    }

    #[test]
    fn scientific_rows_are_ticks() {
        assert!(is_tick_row("  1.5e 07 |      A  A   |"));
        assert!(is_tick_row("9e+06"));
    }

    #[test]
    fn plain_rows_with_few_spaces_are_ticks() {
        assert!(is_tick_row("    1000                  "));
        assert!(is_tick_row("  0.5 |"));
    }

    #[test]
    fn body_rows_and_rulers_are_not_ticks() {
        assert!(!is_tick_row("  900 |    *      *    |"));
        assert!(!is_tick_row("  0    5    10    15"));
        assert!(!is_tick_row("1 2 3"));
        assert!(!is_tick_row("   Bytes Transmitted"));
        assert!(!is_tick_row(""));
    }

    #[test]
    fn first_and_last_tick_rows_span_the_grid() {
        let g = CharacterGrid::from_rows([
            "title",
            "  2e 07         ",
            "  1.5e 07 |  * |",
            "  body |   *   |",
            "  1e 07        ",
            "  0   1   2   3",
        ]);
        assert_eq!(tick_rows(&g), Some(TickRows { first: 1, last: 4 }));
    }

    #[test]
    fn leading_number_stops_at_border() {
        assert_eq!(leading_number("  1.5e 07 |   |"), Some("1.5e 07"));
        assert_eq!(leading_number("   1000          "), Some("1000"));
        assert_eq!(leading_number("   |"), None);
    }
}
