//! FILENAME: table-engine/src/lib.rs
//! Schema-driven sort/filter engine for tabular record views.
//!
//! This crate turns an in-memory array of records plus a declarative
//! view scheme into the filtered, sorted, paginated and formatted view
//! a table widget renders. It depends on `table-core` for field values,
//! the format registry and the error taxonomy.
//!
//! Layers:
//! - `definition`: View scheme and ephemeral search/sort state (what the table IS)
//! - `view`: Renderable output for the presentation layer (WHAT we display)
//! - `engine`: Filter, sort, paginate, format (HOW we calculate)

pub mod definition;
pub mod engine;
pub mod view;

pub use definition::*;
pub use engine::{
    calculate_view, filter_items, next_sort_state, page_count, paginate, sort_items, PageRequest,
    SearchMatcher,
};
pub use view::*;
