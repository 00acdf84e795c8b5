//! FILENAME: export/src/lib.rs
//! Export adapters for table views: xlsx download and print-to-PDF
//! page styling. Both consume the already filtered and sorted records
//! plus the view scheme; neither reaches back into the engine.

pub mod error;
pub mod print;
pub mod xlsx;

pub use error::ExportError;
pub use print::{page_styles_for_print, PrintStyleScope, StyleHost, StyleId};
pub use xlsx::{save_xlsx, xlsx_to_buffer, SHEET_NAME};
