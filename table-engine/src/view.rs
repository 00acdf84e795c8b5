//! FILENAME: table-engine/src/view.rs
//! Table View - Renderable output for the presentation layer.
//!
//! This module holds the result of a full filter/sort/paginate/format
//! pass: header cells with the active sort direction, and data cells
//! carrying both the raw value and its display string. The export
//! adapters consume the same structure.

use table_core::{EngineError, FieldValue};
use serde::{Deserialize, Serialize};

use crate::definition::SortDirection;

/// Marker rendered into a cell whose value could not be formatted.
pub const PARSE_MARKER: &str = "#PARSE!";

/// One header cell of the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderCell {
    /// Field name, usable as the argument to a sort toggle.
    pub field: String,

    /// Display title.
    pub title: String,

    /// Whether clicking this header cycles sorting.
    pub sortable: bool,

    /// Direction if this is the actively sorted field, `None` otherwise.
    pub direction: SortDirection,

    /// Column width hint in pixels.
    pub width: Option<f64>,
}

/// One data cell of the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewCell {
    /// The raw field value the cell was built from.
    pub raw: FieldValue,

    /// Pre-formatted display string.
    pub formatted: String,

    /// Set when formatting failed; `formatted` then holds the marker.
    pub error: Option<String>,
}

impl ViewCell {
    pub fn new(raw: FieldValue, formatted: String) -> Self {
        ViewCell {
            raw,
            formatted,
            error: None,
        }
    }

    /// A cell that failed to format. The record stays in the view; only
    /// the offending field is flagged.
    pub fn failed(raw: FieldValue, error: &EngineError) -> Self {
        ViewCell {
            raw,
            formatted: PARSE_MARKER.to_string(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The complete rendered view of a table page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    /// Header cells in scheme order.
    pub headers: Vec<HeaderCell>,

    /// The page's data cells, indexed as rows[row][col].
    pub rows: Vec<Vec<ViewCell>>,

    /// Filtered record count before pagination; drives the pager label.
    pub total_rows: usize,

    /// Zero-based page index of this view.
    pub page: usize,

    /// Rows per page the view was sliced with.
    pub limit: usize,

    /// Total pages, never less than one.
    pub page_count: usize,
}

impl TableView {
    /// Number of rows on this page.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.headers.len()
    }

    /// Gets a cell at the specified position.
    pub fn get_cell(&self, row: usize, col: usize) -> Option<&ViewCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_cell_carries_marker_and_cause() {
        let error = EngineError::Parse {
            value: "gibberish".to_string(),
            expected: "timestamp",
        };
        let cell = ViewCell::failed(FieldValue::text("gibberish"), &error);
        assert!(cell.is_error());
        assert_eq!(cell.formatted, PARSE_MARKER);
        assert!(cell.error.as_deref().unwrap().contains("gibberish"));
    }

    #[test]
    fn test_get_cell_out_of_bounds() {
        let view = TableView {
            headers: Vec::new(),
            rows: Vec::new(),
            total_rows: 0,
            page: 0,
            limit: 0,
            page_count: 1,
        };
        assert!(view.get_cell(0, 0).is_none());
    }
}
