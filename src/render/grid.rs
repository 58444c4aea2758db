//! Chart text as an ordered list of rows.
//!
//! Columns are counted in `char`s, never bytes: substituted glyphs may be
//! multi-byte and must not shift the detected border positions.

use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterGrid {
    rows: Vec<String>,
}

impl CharacterGrid {
    /// Split on `'\n'`. A trailing newline yields a final empty row, so
    /// `to_string` reproduces the input exactly.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rows: text.split('\n').map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
    #[inline]
    pub fn rows_mut(&mut self) -> &mut Vec<String> {
        &mut self.rows
    }
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&str> {
        self.rows.get(i).map(String::as_str)
    }
}

impl fmt::Display for CharacterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

// --- Column helpers ---

/// Width of a row in columns.
#[inline]
pub(crate) fn width(row: &str) -> usize {
    row.chars().count()
}

/// Column of the first occurrence of `c`.
#[inline]
pub(crate) fn first_column(row: &str, c: char) -> Option<usize> {
    row.chars().position(|x| x == c)
}

/// Column of the last occurrence of `c`.
#[inline]
pub(crate) fn last_column(row: &str, c: char) -> Option<usize> {
    row.chars()
        .enumerate()
        .filter(|&(_, x)| x == c)
        .map(|(i, _)| i)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trips_with_trailing_newline() {
        let text = "a\n b \n\n";
        let g = CharacterGrid::from_text(text);
        assert_eq!(g.len(), 4);
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let row = "●● |  ● |";
        assert_eq!(first_column(row, '|'), Some(3));
        assert_eq!(last_column(row, '|'), Some(8));
        assert_eq!(width(row), 9);
        assert_eq!(first_column(row, '#'), None);
    }
}
