//! FILENAME: table-engine/src/engine.rs
//! Sort/Filter Engine - Pure transformations over record arrays.
//!
//! Every call site composes the same pipeline:
//! `view = paginate(sort(filter(records, search), sort_state), page)`.
//! Filtering always precedes sorting; pagination always follows both.
//! All functions return new vectors; the source slice is never mutated,
//! and recomputing from scratch always yields identical results.

use std::cmp::Ordering;

use table_core::{parse_timestamp, render, EngineError, FieldValue, FormatTag, Locale};
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::definition::{SearchState, SortDirection, SortState, ViewScheme};
use crate::view::{HeaderCell, TableView, ViewCell};

// ============================================================================
// SEARCH MATCHER
// ============================================================================

/// A case-insensitive substring matcher, compiled once per search state.
///
/// User input is always treated as a literal: metacharacters are escaped
/// before the pattern is built, so typing `1.5 (a+` can never break the
/// engine or change the match semantics. An empty value matches every
/// record.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    regex: Regex,
}

impl SearchMatcher {
    pub fn compile(value: &str) -> Result<Self, EngineError> {
        let regex = RegexBuilder::new(&regex::escape(value))
            .case_insensitive(true)
            .build()?;
        Ok(SearchMatcher { regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// Keeps the records whose searched field matches the search text,
/// preserving the original relative order. `None` returns the input
/// unchanged.
pub fn filter_items<T: Clone>(
    items: &[T],
    scheme: &ViewScheme<T>,
    search: Option<&SearchState>,
) -> Result<Vec<T>, EngineError> {
    let Some(search) = search else {
        return Ok(items.to_vec());
    };

    let descriptor = scheme.require(&search.field)?;
    let matcher = SearchMatcher::compile(&search.value)?;

    Ok(items
        .iter()
        .filter(|item| matcher.is_match(&descriptor.value_of(item).as_text()))
        .cloned()
        .collect())
}

// ============================================================================
// SORT
// ============================================================================

/// Returns a new vector sorted by the directive's field, using the
/// comparator selected by the directive's format tag. `None` or a
/// `none` direction returns the input unchanged.
///
/// The sort is stable: records with equal keys keep their original
/// relative order, so re-sorting already-sorted data never reshuffles.
pub fn sort_items<T: Clone>(
    items: &[T],
    scheme: &ViewScheme<T>,
    sort: Option<&SortState>,
) -> Result<Vec<T>, EngineError> {
    let Some(sort) = sort else {
        return Ok(items.to_vec());
    };
    if sort.direction.is_none() {
        return Ok(items.to_vec());
    }

    let descriptor = scheme.require(&sort.field)?;
    let format = sort.format;

    let mut sorted = items.to_vec();
    match sort.direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| {
            compare_by_format(&descriptor.value_of(a), &descriptor.value_of(b), format)
        }),
        SortDirection::Descending => sorted.sort_by(|a, b| {
            compare_by_format(&descriptor.value_of(b), &descriptor.value_of(a), format)
        }),
        SortDirection::None => {}
    }

    Ok(sorted)
}

/// Compares two raw values under the semantics of a format tag.
///
/// Values that fail to parse under a numeric or date tag are pinned as
/// always-greater, so they collect at the far end instead of producing
/// an unspecified order. The comparison itself never fails; a bad value
/// is a per-record condition, not a reason to abort the sort.
fn compare_by_format(a: &FieldValue, b: &FieldValue, format: FormatTag) -> Ordering {
    match format {
        FormatTag::String => {
            let (ta, tb) = (a.as_text(), b.as_text());
            ta.to_lowercase()
                .cmp(&tb.to_lowercase())
                .then_with(|| ta.cmp(&tb))
        }
        FormatTag::Number | FormatTag::Price => compare_parsed(a.as_number(), b.as_number()),
        FormatTag::Date => compare_parsed(parse_timestamp(a).ok(), parse_timestamp(b).ok()),
    }
}

fn compare_parsed<V: PartialOrd>(a: Option<V>, b: Option<V>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// SORT DIRECTION STATE MACHINE
// ============================================================================

/// Advances the sort state in response to a header click.
///
/// Clicking the active field cycles its direction; clicking another
/// sortable field restarts at ascending. A click on an unknown or
/// non-sortable field is a guarded no-op and returns the previous
/// state unchanged.
pub fn next_sort_state<T>(
    scheme: &ViewScheme<T>,
    prev: Option<&SortState>,
    field: &str,
) -> Option<SortState> {
    let descriptor = match scheme.descriptor(field) {
        Some(d) if d.sortable => d,
        Some(_) => {
            warn!("ignoring sort toggle on non-sortable field '{}'", field);
            return prev.cloned();
        }
        None => {
            warn!("ignoring sort toggle on unknown field '{}'", field);
            return prev.cloned();
        }
    };

    let direction = match prev {
        Some(p) if p.field == field => p.direction.next(),
        _ => SortDirection::Ascending,
    };

    Some(SortState::new(field, descriptor.format, direction))
}

// ============================================================================
// PAGINATION
// ============================================================================

/// One page of the view: zero-based page index and rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        PageRequest { page, limit }
    }
}

/// Returns the contiguous slice `[page*limit, page*limit + limit)`,
/// clamped to the array bounds.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Vec<T> {
    let start = page.saturating_mul(limit).min(items.len());
    let end = start.saturating_add(limit).min(items.len());
    items[start..end].to_vec()
}

/// Number of pages shown by the pager; never less than one.
pub fn page_count(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 1;
    }
    std::cmp::max(1, (total + limit - 1) / limit)
}

// ============================================================================
// VIEW CALCULATION
// ============================================================================

/// Runs the full pipeline and renders the result into a `TableView`.
///
/// A cell whose value cannot be rendered (e.g. an unparseable date)
/// degrades to an error marker instead of aborting the whole view.
pub fn calculate_view<T: Clone>(
    items: &[T],
    scheme: &ViewScheme<T>,
    search: Option<&SearchState>,
    sort: Option<&SortState>,
    pagination: Option<PageRequest>,
    locale: &Locale,
) -> Result<TableView, EngineError> {
    let filtered = filter_items(items, scheme, search)?;
    let sorted = sort_items(&filtered, scheme, sort)?;
    let total_rows = sorted.len();

    let (page_items, page, limit, pages) = match pagination {
        Some(p) => (
            paginate(&sorted, p.page, p.limit),
            p.page,
            p.limit,
            page_count(total_rows, p.limit),
        ),
        None => (sorted, 0, total_rows, 1),
    };

    let headers = scheme
        .fields()
        .iter()
        .map(|d| {
            let direction = match sort {
                Some(s) if s.field == d.name => s.direction,
                _ => SortDirection::None,
            };
            HeaderCell {
                field: d.name.clone(),
                title: d.title.clone(),
                sortable: d.sortable,
                direction,
                width: d.width,
            }
        })
        .collect();

    let mut rows = Vec::with_capacity(page_items.len());
    for item in &page_items {
        let mut cells = Vec::with_capacity(scheme.len());
        for descriptor in scheme.fields() {
            let raw = descriptor.value_of(item);
            match render(descriptor.format, &raw, locale) {
                Ok(formatted) => cells.push(ViewCell::new(raw, formatted)),
                Err(e) => {
                    warn!("field '{}' failed to render: {}", descriptor.name, e);
                    cells.push(ViewCell::failed(raw, &e));
                }
            }
        }
        rows.push(cells);
    }

    debug!(
        "calculated view: {} of {} rows, page {} of {}",
        rows.len(),
        total_rows,
        page + 1,
        pages
    );

    Ok(TableView {
        headers,
        rows,
        total_rows,
        page,
        limit,
        page_count: pages,
    })
}
