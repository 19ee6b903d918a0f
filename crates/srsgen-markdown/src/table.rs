// src/table.rs

//! Markdown pipe-table extraction.
//!
//! A table is a contiguous run of lines that start with `|` once trimmed: a
//! header line, a separator line (skipped, never validated) and one or more
//! data lines. Runs shorter than three lines produce no rows. Cells are split
//! on `|` with no escaping.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static CELL_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|\n").expect("cell break pattern is valid"));

/// One data row, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRow {
    cells: BTreeMap<String, String>,
}

impl TableRow {
    /// Build a row from header/cell pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Cell value for `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// First non-empty value among alternative column names.
    pub fn first_of(&self, columns: &[&str]) -> Option<&str> {
        columns
            .iter()
            .filter_map(|c| self.get(c))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    /// Cell value for `column`, or `default` when absent or blank.
    pub fn get_or<'a>(&'a self, column: &str, default: &'a str) -> &'a str {
        self.first_of(&[column]).unwrap_or(default)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A single parsed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column headers in source order.
    pub headers: Vec<String>,
    /// Data rows in source order.
    pub rows: Vec<TableRow>,
}

/// Parse every table in `text`, in document order.
///
/// A blank line or a heading closes the current table. Any other line that
/// does not start with `|` is skipped, so a stray line inside a table keeps
/// the rows after it.
pub fn parse_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('|') {
            block.push(trimmed);
        } else if (trimmed.is_empty() || trimmed.starts_with('#')) && !block.is_empty() {
            tables.extend(parse_block(&block));
            block.clear();
        }
    }
    if !block.is_empty() {
        tables.extend(parse_block(&block));
    }

    tables
}

/// Rows of every table in `text`, in document order.
pub fn extract_rows(text: &str) -> Vec<TableRow> {
    parse_tables(text)
        .into_iter()
        .flat_map(|table| table.rows)
        .collect()
}

fn parse_block(lines: &[&str]) -> Option<Table> {
    if lines.len() < 3 {
        return None;
    }

    let headers = split_cells(lines[0]);
    let rows = lines[2..]
        .iter()
        .map(|line| {
            let mut cells = split_cells(line);
            cells.resize(headers.len(), String::new());
            TableRow::from_pairs(headers.iter().cloned().zip(cells))
        })
        .collect();

    Some(Table { headers, rows })
}

fn split_cells(line: &str) -> Vec<String> {
    line.trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Split a cell holding several items (`<br>`-separated or multi-line) into
/// its items, dropping leading bullet dashes and blanks.
pub fn split_cell_items(cell: &str) -> Vec<String> {
    CELL_BREAK
        .split(cell)
        .map(|item| item.trim().trim_start_matches("- ").trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
