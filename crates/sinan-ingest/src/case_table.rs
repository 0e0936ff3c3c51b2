use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

/// In-memory notification table: named columns, every cell a string.
///
/// SINAN exports are consumed as text; any typing (dates, codes, ages)
/// happens downstream in the transform layer.
#[derive(Debug, Clone)]
pub struct CaseTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl CaseTable {
    pub fn new(headers: Vec<String>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// Builds a table from pre-split rows, padding or truncating each row to
    /// the header width.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(headers);
        let width = table.headers.len();
        for mut row in rows {
            row.resize(width, String::new());
            table.rows.push(row);
        }
        table
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the index of `name`, appending an empty column if absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(i) = self.column_index(name) {
            return i;
        }
        let i = self.headers.len();
        self.headers.push(name.to_string());
        self.index.insert(name.to_string(), i);
        for row in &mut self.rows {
            row.push(String::new());
        }
        i
    }

    /// Overwrites every row's cell in `name` with `value`, creating the
    /// column first if needed.
    pub fn fill_column(&mut self, name: &str, value: &str) {
        let i = self.ensure_column(name);
        for row in &mut self.rows {
            row[i] = value.to_string();
        }
    }

    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|cells| cells[col].as_str())
    }

    pub fn set(&mut self, row: usize, name: &str, value: &str) {
        let col = self.ensure_column(name);
        if let Some(cells) = self.rows.get_mut(row) {
            cells[col] = value.to_string();
        }
    }

    /// Applies `f` to every cell in place (used for sentinel normalization).
    pub fn map_cells(&mut self, f: impl Fn(&str) -> Option<String>) {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                if let Some(replacement) = f(cell) {
                    *cell = replacement;
                }
            }
        }
    }

    pub fn row(&self, index: usize) -> Row<'_> {
        Row { table: self, index }
    }

    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }
}

/// Borrowed view of one table row with column access by name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a CaseTable,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell content, or `None` when the column does not exist.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.table.get(self.index, name)
    }

    /// Cell content with absent columns and blank cells collapsed to `""`.
    pub fn value(&self, name: &str) -> &'a str {
        self.get(name).unwrap_or("")
    }

    /// Cell content, treating absent columns and blank cells as missing.
    pub fn non_blank(&self, name: &str) -> Option<&'a str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

/// Reads a notification CSV with all cells as strings.
pub fn read_case_table(path: &Path) -> Result<CaseTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open case table {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("read case table headers")?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read case table record {}", line + 1))?;
        rows.push(record.iter().map(normalize_cell).collect());
    }

    let table = CaseTable::from_rows(headers, rows);
    info!(rows = table.len(), path = %path.display(), "case table read");
    Ok(table)
}
