//! FILENAME: table-engine/src/definition.rs
//! Table Definition - The view scheme and the ephemeral UI state.
//!
//! This module contains all the types needed to DESCRIBE a table view:
//! - `ViewScheme` / `FieldDescriptor`: declared once per table usage,
//!   they map record fields to titles, format tags and accessors.
//! - `SearchState` / `SortState`: created on user interaction, they live
//!   only while the table is mounted and reset to `None` on unmount.
//!
//! Field access is reflection-free: every descriptor carries an accessor
//! function built at scheme construction time, so the engine never has
//! to reach into an arbitrary record shape at runtime.

use std::fmt;

use table_core::{EngineError, FieldValue, FormatTag};
use serde::{Deserialize, Serialize};

/// Extracts one field's raw value from a record.
pub type Accessor<T> = fn(&T) -> FieldValue;

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// One column of the view: how to read it, label it, format it, and
/// whether the header toggles sorting.
pub struct FieldDescriptor<T> {
    /// Field name, the key used by search and sort state.
    pub name: String,

    /// Column title shown in the header row.
    pub title: String,

    /// Display and comparison semantics for this column.
    pub format: FormatTag,

    /// Whether clicking the header cycles the sort direction.
    pub sortable: bool,

    /// Column width hint in pixels.
    pub width: Option<f64>,

    accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        format: FormatTag,
        accessor: Accessor<T>,
    ) -> Self {
        FieldDescriptor {
            name: name.into(),
            title: title.into(),
            format,
            sortable: false,
            width: None,
            accessor,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Reads this field's raw value from a record.
    pub fn value_of(&self, item: &T) -> FieldValue {
        (self.accessor)(item)
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        FieldDescriptor {
            name: self.name.clone(),
            title: self.title.clone(),
            format: self.format,
            sortable: self.sortable,
            width: self.width,
            accessor: self.accessor,
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("format", &self.format)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .finish()
    }
}

// ============================================================================
// VIEW SCHEME
// ============================================================================

/// The ordered set of field descriptors for one table usage.
/// Column order in the view follows declaration order.
pub struct ViewScheme<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> ViewScheme<T> {
    pub fn new() -> Self {
        ViewScheme { fields: Vec::new() }
    }

    /// Builder-style field registration.
    pub fn with_field(mut self, descriptor: FieldDescriptor<T>) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn push(&mut self, descriptor: FieldDescriptor<T>) {
        self.fields.push(descriptor);
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a descriptor by field name.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|d| d.name == name)
    }

    /// Like `descriptor`, but an absent field is a configuration error.
    pub fn require(&self, name: &str) -> Result<&FieldDescriptor<T>, EngineError> {
        self.descriptor(name)
            .ok_or_else(|| EngineError::UnknownField(name.to_string()))
    }

    /// For callers that validate a header click before toggling sort:
    /// the field must exist and be declared sortable.
    pub fn require_sortable(&self, name: &str) -> Result<&FieldDescriptor<T>, EngineError> {
        let descriptor = self.require(name)?;
        if !descriptor.sortable {
            return Err(EngineError::NotSortable(name.to_string()));
        }
        Ok(descriptor)
    }
}

impl<T> Clone for ViewScheme<T> {
    fn clone(&self) -> Self {
        ViewScheme {
            fields: self.fields.clone(),
        }
    }
}

impl<T> Default for ViewScheme<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ViewScheme<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewScheme")
            .field("fields", &self.fields)
            .finish()
    }
}

// ============================================================================
// SEARCH AND SORT STATE
// ============================================================================

/// Sort direction, cycled per field by repeated header clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// The three-state cycle: none -> ascending -> descending -> none.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == SortDirection::None
    }
}

/// The active filter: a field plus the text the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub field: String,
    pub value: String,
}

impl SearchState {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        SearchState {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// The active sort directive. The format tag is captured from the scheme
/// at click time so the comparator never re-derives it at sort time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    pub format: FormatTag,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: impl Into<String>, format: FormatTag, direction: SortDirection) -> Self {
        SortState {
            field: field.into(),
            format,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_cycle() {
        let mut direction = SortDirection::None;
        direction = direction.next();
        assert_eq!(direction, SortDirection::Ascending);
        direction = direction.next();
        assert_eq!(direction, SortDirection::Descending);
        direction = direction.next();
        assert_eq!(direction, SortDirection::None);
    }

    #[test]
    fn test_scheme_lookup() {
        let scheme: ViewScheme<(f64, f64)> = ViewScheme::new()
            .with_field(FieldDescriptor::new(
                "first",
                "First",
                FormatTag::Number,
                |t: &(f64, f64)| FieldValue::Number(t.0),
            ))
            .with_field(
                FieldDescriptor::new("second", "Second", FormatTag::Number, |t: &(f64, f64)| {
                    FieldValue::Number(t.1)
                })
                .sortable(),
            );

        assert_eq!(scheme.len(), 2);
        assert!(scheme.descriptor("first").is_some());
        assert!(!scheme.descriptor("first").unwrap().sortable);
        assert!(scheme.descriptor("second").unwrap().sortable);
        assert!(matches!(
            scheme.require("third"),
            Err(EngineError::UnknownField(name)) if name == "third"
        ));
        assert!(matches!(
            scheme.require_sortable("first"),
            Err(EngineError::NotSortable(name)) if name == "first"
        ));
        assert!(scheme.require_sortable("second").is_ok());
    }

    #[test]
    fn test_sort_state_serde_direction_names() {
        let state = SortState::new("date", FormatTag::Date, SortDirection::Descending);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"descending\""));
        assert!(json.contains("\"date\""));
    }
}
