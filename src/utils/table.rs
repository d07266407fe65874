//! Table rendering utilities for CLI outputs.
//!
//! Cells wider than their column are wrapped onto extra lines, so a row may
//! span several terminal lines.

use crate::utils::formatting::{pad_left, pad_right};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub width: usize,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Left,
        }
    }

    pub fn right(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>, separator: char) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn pad(col: &Column, s: &str) -> String {
        match col.align {
            Align::Left => pad_right(s, col.width),
            Align::Right => pad_left(s, col.width),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| Self::pad(c, &c.header))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&self.separator.to_string().repeat(total.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            let wrapped: Vec<Vec<String>> = self
                .columns
                .iter()
                .zip(row)
                .map(|(col, cell)| {
                    textwrap::wrap(cell, col.width.max(1))
                        .into_iter()
                        .map(|l| l.into_owned())
                        .collect()
                })
                .collect();
            let height = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

            for line in 0..height {
                let cells: Vec<String> = self
                    .columns
                    .iter()
                    .zip(&wrapped)
                    .map(|(col, lines)| Self::pad(col, lines.get(line).map(String::as_str).unwrap_or("")))
                    .collect();
                out.push_str(cells.join(" ").trim_end());
                out.push('\n');
            }
        }

        out
    }
}
