//! Rewrite passes that turn raw dumb-terminal output into the final chart.
//!
//! ### Pass order
//! 1. `bounding_box` is measured on the raw rows.
//! 2. `substitute_glyphs` swaps series glyphs and blanks the engine's own
//!    rules, underscores and point markers.
//! 3. `redraw_borders` replaces the first/last tick rows with clean
//!    horizontal borders aligned to the box.
//! 4. `overlay_y_label` writes the y label down the left margin.
//! 5. `append_axis_info` adds the x/y descriptions below the chart.
//!
//! Each pass is independent and total; missing structure means the pass is
//! skipped, never an error.

use tracing::debug;

use crate::{
    core::{
        config::{Glyphs, RenderProfile},
        constants::{
            BORDER_CORNER, BORDER_RULE, ENGINE_POINT_GLYPH, ENGINE_PRIMARY_GLYPH,
            ENGINE_SECONDARY_GLYPH, LABEL_SPACE, PROTECTED_PHRASES, X_AXIS_PREFIX, Y_AXIS_PREFIX,
        },
    },
    render::{
        bounds::{BoundingBox, RowExtent, TickRows, bounding_box, leading_number, tick_rows},
        grid::{CharacterGrid, width},
    },
};

/// Axis descriptions for one chart.
#[derive(Clone, Copy, Debug)]
pub struct AxisLabels<'a> {
    pub x: &'a str,
    pub y: &'a str,
}

// --- Glyphs ---

/// Title and metadata rows are never rewritten.
#[inline]
#[must_use]
pub fn is_protected(row: &str) -> bool {
    PROTECTED_PHRASES.iter().any(|p| row.contains(p))
}

/// Single-pass mapping, so a substituted glyph is never itself stripped or
/// substituted again.
#[inline]
fn substitute_char(c: char, glyphs: &Glyphs) -> char {
    match c {
        ENGINE_PRIMARY_GLYPH => glyphs.primary,
        ENGINE_SECONDARY_GLYPH => glyphs.secondary,
        '-' | '_' | ENGINE_POINT_GLYPH => ' ',
        other => other,
    }
}

pub fn substitute_glyphs(grid: &mut CharacterGrid, glyphs: &Glyphs) {
    for row in grid.rows_mut().iter_mut().filter(|r| !is_protected(r)) {
        *row = row.chars().map(|c| substitute_char(c, glyphs)).collect();
    }
}

// --- Borders ---

/// `label`, right-aligned to end one column before the box's left border,
/// followed by a corner, the rule and a closing corner.
///
/// A label too wide for the margin is placed flush left instead.
#[must_use]
pub fn border_row(label: &str, bbox: &BoundingBox) -> String {
    let label_end = bbox.left.saturating_sub(1);
    let pad = label_end.saturating_sub(width(label));

    let mut out = String::with_capacity(pad + label.len() + bbox.rule_len() + 3);
    out.extend(std::iter::repeat_n(' ', pad));
    out.push_str(label);
    out.push(' ');
    out.push(BORDER_CORNER);
    out.extend(std::iter::repeat_n(BORDER_RULE, bbox.rule_len()));
    out.push(BORDER_CORNER);
    out
}

/// Replace the first and last tick rows with redrawn borders.
///
/// Returns the rows that were rewritten, if any.
pub fn redraw_borders(grid: &mut CharacterGrid, bbox: &BoundingBox) -> Option<TickRows> {
    let Some(ticks) = tick_rows(grid) else {
        debug!("no y-axis tick rows found; borders left as drawn");
        return None;
    };

    // A single tick row is rewritten once; a second pass would read the
    // redrawn rule as part of the number.
    let mut targets = vec![ticks.first];
    if ticks.last != ticks.first {
        targets.push(ticks.last);
    }
    for i in targets {
        let Some(label) = grid.row(i).and_then(leading_number).map(str::to_owned) else {
            continue;
        };
        grid.rows_mut()[i] = border_row(&label, bbox);
    }
    Some(ticks)
}

// --- Y label ---

/// Write `label` one glyph per row down the left margin, centred on `extent`.
///
/// Labelled rows get `"<glyph> "` prepended; every other row inside `span`
/// gets two blanks so the plot body stays aligned. `span` must cover
/// `extent`; it is wider when redrawn borders sit just outside the box.
pub fn overlay_y_label(grid: &mut CharacterGrid, extent: RowExtent, span: RowExtent, label: &str) {
    let glyphs: Vec<char> = label
        .chars()
        .map(|c| if c == ' ' { LABEL_SPACE } else { c })
        .collect();

    let center = extent.first + extent.height() / 2;
    let half = glyphs.len() / 2;
    // Rows above the top of the grid are dropped, along with their glyphs.
    let (start, skip) = if center >= half {
        (center - half, 0)
    } else {
        (0, half - center)
    };
    let labelled = start..start + (glyphs.len() - skip);

    for (i, row) in grid.rows_mut().iter_mut().enumerate() {
        if labelled.contains(&i) {
            let c = glyphs[skip + i - start];
            let mut prefixed = String::with_capacity(row.len() + c.len_utf8() + 1);
            prefixed.push(c);
            prefixed.push(' ');
            prefixed.push_str(row);
            *row = prefixed;
        } else if span.contains(i) {
            row.insert_str(0, "  ");
        }
    }
}

// --- Metadata ---

/// Trim trailing blank rows, then append a blank row and the axis descriptions.
pub fn append_axis_info(grid: &mut CharacterGrid, labels: &AxisLabels<'_>) {
    let rows = grid.rows_mut();
    while rows.last().is_some_and(|r| r.trim().is_empty()) {
        rows.pop();
    }
    rows.push(String::new());
    rows.push(format!("{X_AXIS_PREFIX}{}", labels.x));
    rows.push(format!("{Y_AXIS_PREFIX}{}", labels.y));
}

// --- Pipeline ---

/// Run every pass over `raw` according to `profile`.
#[must_use]
pub fn post_process(raw: &str, labels: &AxisLabels<'_>, profile: &RenderProfile) -> CharacterGrid {
    let mut grid = CharacterGrid::from_text(raw);
    let bbox = bounding_box(&grid);
    debug!(?bbox, rows = grid.len(), "measured plot box");

    substitute_glyphs(&mut grid, &profile.glyphs);

    let Some(bbox) = bbox else {
        debug!("no plot box found; emitting undecorated chart");
        if profile.axis_info_below {
            append_axis_info(&mut grid, labels);
        }
        return grid;
    };

    let redrawn = redraw_borders(&mut grid, &bbox);

    if profile.y_label.overlay_vertical_left() {
        let span = redrawn.map_or(bbox.rows, |t| RowExtent {
            first: bbox.rows.first.min(t.first),
            last: bbox.rows.last.max(t.last),
        });
        overlay_y_label(&mut grid, bbox.rows, span, labels.y);
    }

    if profile.axis_info_below {
        append_axis_info(&mut grid, labels);
    }
    grid
}
