//! FILENAME: export/src/xlsx.rs

use std::path::Path;

use log::debug;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use table_core::FieldValue;
use table_engine::ViewScheme;

use crate::ExportError;

/// Sheet name used for the exported table.
pub const SHEET_NAME: &str = "table";

/// Writes the records to an xlsx file at `path`.
///
/// Only fields declared in the scheme are exported, in scheme order;
/// anything else on the record type is dropped. Values are written with
/// their native cell type so spreadsheet software can keep sorting and
/// summing them.
pub fn save_xlsx<T>(items: &[T], scheme: &ViewScheme<T>, path: &Path) -> Result<(), ExportError> {
    let mut xlsx = build_workbook(items, scheme)?;
    xlsx.save(path)?;
    debug!("exported {} rows to {}", items.len(), path.display());
    Ok(())
}

/// Like `save_xlsx`, but returns the file content as a byte buffer.
pub fn xlsx_to_buffer<T>(items: &[T], scheme: &ViewScheme<T>) -> Result<Vec<u8>, ExportError> {
    let mut xlsx = build_workbook(items, scheme)?;
    Ok(xlsx.save_to_buffer()?)
}

fn build_workbook<T>(items: &[T], scheme: &ViewScheme<T>) -> Result<XlsxWorkbook, ExportError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();

    for (col, descriptor) in scheme.fields().iter().enumerate() {
        let col = col as u16;
        // Excel uses character width, roughly pixels / 7
        if let Some(width) = descriptor.width {
            worksheet.set_column_width(col, width / 7.0)?;
        }
        worksheet.write_string_with_format(0, col, &descriptor.title, &header_format)?;
    }

    for (row, item) in items.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, descriptor) in scheme.fields().iter().enumerate() {
            let col = col as u16;
            match descriptor.value_of(item) {
                FieldValue::Empty => {}
                FieldValue::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                FieldValue::Text(s) => {
                    worksheet.write_string(row, col, &s)?;
                }
                FieldValue::Boolean(b) => {
                    worksheet.write_boolean(row, col, b)?;
                }
            }
        }
    }

    Ok(xlsx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_core::FormatTag;
    use table_engine::FieldDescriptor;

    #[derive(Clone)]
    struct Transaction {
        name: &'static str,
        cost: f64,
        #[allow(dead_code)]
        internal_id: u64,
    }

    fn test_scheme() -> ViewScheme<Transaction> {
        // internal_id is deliberately not declared: it must not be exported
        ViewScheme::new()
            .with_field(
                FieldDescriptor::new("name", "Transport", FormatTag::String, |t: &Transaction| {
                    FieldValue::text(t.name)
                })
                .with_width(210.0),
            )
            .with_field(FieldDescriptor::new(
                "cost",
                "Cost",
                FormatTag::Price,
                |t: &Transaction| FieldValue::Number(t.cost),
            ))
    }

    fn test_items() -> Vec<Transaction> {
        vec![
            Transaction {
                name: "КАМАЗ-65115",
                cost: 8283.5,
                internal_id: 900,
            },
            Transaction {
                name: "ГАЗель NEXT",
                cost: 2410.0,
                internal_id: 901,
            },
        ]
    }

    #[test]
    fn test_save_xlsx_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.xlsx");

        save_xlsx(&test_items(), &test_scheme(), &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_buffer_is_a_zip_container() {
        let buffer = xlsx_to_buffer(&test_items(), &test_scheme()).unwrap();
        // xlsx files are zip archives; check the magic bytes
        assert_eq!(&buffer[0..2], b"PK");
    }

    #[test]
    fn test_empty_item_list_still_writes_headers() {
        let items: Vec<Transaction> = Vec::new();
        let buffer = xlsx_to_buffer(&items, &test_scheme()).unwrap();
        assert!(!buffer.is_empty());
    }
}
