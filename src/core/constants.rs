//! A collection of constants.

/// Rows shorter than this are never part of the plot box (stray labels, key entries).
pub const MIN_BOX_ROW_WIDTH: usize = 50;

/// Vertical border drawn by the dumb terminal on every box row.
pub const VERTICAL_BORDER: char = '|';
/// Corner glyph used when a horizontal border is redrawn.
pub const BORDER_CORNER: char = '+';
/// Horizontal rule glyph used when a horizontal border is redrawn.
pub const BORDER_RULE: char = '-';

/// Glyphs gnuplot's dumb terminal emits before substitution.
pub const ENGINE_PRIMARY_GLYPH: char = '*';
pub const ENGINE_SECONDARY_GLYPH: char = 'A';
pub const ENGINE_POINT_GLYPH: char = '+';

/// Rows containing any of these are human-readable text and are left untouched.
pub const PROTECTED_PHRASES: [&str; 4] = ["Network", "Measurement Data", "X Axis:", "Y Axis:"];

/// Stands in for spaces when the y-axis label is written one glyph per row.
pub const LABEL_SPACE: char = '_';

/// Only this many leading characters are inspected for digits on a tick row.
pub const TICK_DIGIT_WINDOW: usize = 15;
/// Tick rows with more embedded spaces than this are treated as plot body.
pub const TICK_MAX_SPACES: usize = 2;

/// Prefix of the below-chart metadata lines.
pub const X_AXIS_PREFIX: &str = "X Axis: ";
pub const Y_AXIS_PREFIX: &str = "Y Axis: ";

/// Data points are written with six decimals unless configured otherwise.
///
/// 1000 becomes 1000.000000
pub const DECIMAL_PRECISION: usize = 6;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "config.ini";
