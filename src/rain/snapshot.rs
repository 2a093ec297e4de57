//! Field snapshot for testing and debugging
//!
//! Provides a serializable view of the animation state.

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::field::Field;

/// State of a whole field at one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub rows: usize,
    pub columns: Vec<ColumnSnapshot>,
}

/// State of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    /// Characters, top row first
    pub chars: String,
    /// Drop ages, newest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drops: Vec<usize>,
    /// Ramp index per row
    pub colors: Vec<usize>,
}

impl ColumnSnapshot {
    pub fn from_column<R>(column: &Column<R>) -> Self {
        let glyphs = column.render();
        Self {
            chars: glyphs.iter().map(|g| g.ch).collect(),
            drops: column.drops().collect(),
            colors: glyphs.iter().map(|g| g.color).collect(),
        }
    }
}

impl Snapshot {
    pub fn from_field(field: &Field) -> Self {
        Self {
            frame: field.frame(),
            rows: field.config().column_length(),
            columns: field
                .columns()
                .iter()
                .map(ColumnSnapshot::from_column)
                .collect(),
        }
    }

    /// Screen text: one line per row, columns two cells apart
    ///
    /// Cells at the background color are left blank when `hide_dim` is set.
    pub fn text(&self, hide_dim: bool, dim_index: usize) -> Vec<String> {
        let chars: Vec<Vec<char>> = self
            .columns
            .iter()
            .map(|column| column.chars.chars().collect())
            .collect();
        (0..self.rows)
            .map(|row| {
                let mut line = String::with_capacity(self.columns.len() * 2);
                for (column, column_chars) in self.columns.iter().zip(&chars) {
                    let ch = column_chars.get(row).copied().unwrap_or(' ');
                    let dim = column.colors.get(row).map_or(true, |&c| c >= dim_index);
                    line.push(if hide_dim && dim { ' ' } else { ch });
                    line.push(' ');
                }
                line.truncate(line.trim_end().len());
                line
            })
            .collect()
    }
}
