//! Tabular dataset loaded from CSV
//!
//! Columns are typed once at load time: a column is numeric when every
//! non-empty cell parses as a finite number, otherwise it is treated as text.
//! Rows keep their 0-based position so outlier indices point back into the file.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use csv::ReaderBuilder;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

/// A single named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
    numbers: Option<Vec<Option<f64>>>,
}

impl Column {
    /// Build a column from raw cells, inferring whether it is numeric
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        let numbers = cells
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(raw) => parse_number(raw).map(Some),
            })
            .collect::<Option<Vec<_>>>();

        Self {
            name: name.into(),
            cells,
            numbers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_numeric(&self) -> bool {
        self.numbers.is_some()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Non-missing numeric values with their row index (empty for text columns)
    pub fn present_numbers(&self) -> Vec<(usize, f64)> {
        match &self.numbers {
            Some(numbers) => numbers
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i, v)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Numeric value at a row, if the column is numeric and the cell present
    pub fn number_at(&self, row: usize) -> Option<f64> {
        self.numbers.as_ref().and_then(|n| n.get(row).copied().flatten())
    }

    /// Non-missing text values (empty for numeric columns)
    pub fn present_text(&self) -> Vec<&str> {
        if self.is_numeric() {
            return Vec::new();
        }
        self.cells.iter().filter_map(|c| c.as_deref()).collect()
    }
}

/// In-memory table of columns with equal row counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build from columns; all columns must have the same length
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(Error::InvalidData(format!(
                "Column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                rows
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Parse CSV with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let names = standardize_column_names(headers.iter());
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

        for record in rdr.records() {
            let record = record?;
            for (i, column) in cells.iter_mut().enumerate() {
                let value = record
                    .get(i)
                    .filter(|v| !v.is_empty())
                    .map(|v| v.to_string());
                column.push(value);
            }
        }

        let columns: Vec<Column> = names
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();

        let dataset = Self::from_columns(columns)?;
        debug!(
            rows = dataset.rows,
            columns = dataset.columns.len(),
            numeric = dataset.numeric_columns().len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    pub fn text_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| !c.is_numeric()).collect()
    }

    /// Total number of missing cells
    pub fn missing_cells(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Percentage of missing cells over the whole table (0 for an empty table)
    pub fn missing_percentage(&self) -> f64 {
        let total = self.rows * self.columns.len();
        if total == 0 {
            return 0.0;
        }
        self.missing_cells() as f64 / total as f64 * 100.0
    }

    /// Rows identical to an earlier row
    pub fn duplicate_rows(&self) -> usize {
        let mut seen: HashSet<Vec<Option<&str>>> = HashSet::new();
        let mut duplicates = 0;
        for row in 0..self.rows {
            let key: Vec<Option<&str>> = self
                .columns
                .iter()
                .map(|c| c.cells[row].as_deref())
                .collect();
            if !seen.insert(key) {
                duplicates += 1;
            }
        }
        duplicates
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn non_identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_]").expect("valid regex"))
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-]+").expect("valid regex"))
}

/// Lowercase, join words with `_` and drop anything outside `[a-z0-9_]`
pub fn standardize_column_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let joined = separator_re().replace_all(&lowered, "_");
    non_identifier_re().replace_all(&joined, "").into_owned()
}

/// Standardise a header row, filling blanks and disambiguating repeats
fn standardize_column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (i, header) in headers.enumerate() {
        let mut name = standardize_column_name(header);
        if name.is_empty() {
            name = format!("column_{}", i + 1);
        }
        if names.contains(&name) {
            let base = name.clone();
            let mut n = 2;
            while names.contains(&name) {
                name = format!("{}_{}", base, n);
                n += 1;
            }
        }
        names.push(name);
    }
    names
}
