//! CSV Loader
//!
//! Minimal reader for node telemetry exports: `,` delimiter, first line is
//! the header, blank lines skipped. No quoting rules - the telemetry files
//! never contain embedded commas.

use serde::Serialize;

/// One data line, keyed by header (column order preserved)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Value of `column`, if this row has a cell for it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value.as_str())
    }

    /// Numeric value of `column` (unparseable or missing → None)
    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(|v| v.parse::<f64>().ok())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

/// Parsed file: header plus data rows
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl ParsedCsv {
    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// Parse CSV text into header + rows
///
/// Rows shorter than the header simply lack the trailing cells; extra
/// cells beyond the header are dropped.
pub fn parse(text: &str) -> ParsedCsv {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(header_line) => header_line.split(',').map(|h| h.trim().to_string()).collect(),
        None => return ParsedCsv::default(),
    };

    let mut rows = Vec::new();

    for (line_no, line) in lines.enumerate() {
        let values: Vec<&str> = line.split(',').collect();

        if values.len() != headers.len() {
            log::debug!(
                "Row {} has {} cells, header has {} - keeping what lines up",
                line_no + 1,
                values.len(),
                headers.len()
            );
        }

        let cells = headers
            .iter()
            .zip(values.iter())
            .map(|(h, v)| (h.clone(), v.trim().to_string()))
            .collect();

        rows.push(RawRow { cells });
    }

    ParsedCsv { headers, rows }
}
