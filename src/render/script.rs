//! gnuplot script generation.

use std::{fmt::Write, path::Path};

use crate::core::config::RenderProfile;

/// Tick format used when the y label is shown inline and compact.
const COMPACT_Y_FORMAT: &str = "%.2g";

/// Escape a value for a double-quoted gnuplot string.
fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Build the script for one chart.
///
/// No x label is set: the x description, when wanted, is appended below the
/// chart by the post-processor. The series title is left empty so the key
/// never draws a sample glyph over the plot.
#[must_use]
pub fn build_script(profile: &RenderProfile, data_file: &Path, title: &str, y_label: &str) -> String {
    let mut s = String::new();
    // `write!` into a String cannot fail.
    let _ = write!(s, "set terminal {} {} {}", profile.terminal, profile.width, profile.height);
    if profile.terminal == "dumb" {
        let g = &profile.glyphs;
        let _ = write!(s, " \"{}{}{}\"", g.primary, g.secondary, g.points);
    }
    s.push('\n');

    let _ = writeln!(s, "set title {}", quoted(title));

    if profile.y_label.inline && profile.y_label.compact {
        let _ = writeln!(s, "set ylabel {} offset 0,0", quoted(y_label));
        let _ = writeln!(s, "set format y \"{COMPACT_Y_FORMAT}\"");
    } else {
        let _ = writeln!(s, "set ylabel {}", quoted(y_label));
    }

    if profile.grid {
        s.push_str("set grid\n");
    }

    match &profile.legend {
        Some(position) => {
            let _ = writeln!(s, "set key {position}");
        }
        None => s.push_str("unset key\n"),
    }

    let _ = writeln!(
        s,
        "plot {} using 1:2 with {} title \"\"",
        quoted(&data_file.display().to_string()),
        profile.plot_style
    );
    s
}
