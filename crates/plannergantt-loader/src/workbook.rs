//! Structured workbook (XLSX/XLS) export reading.
//!
//! Planner workbook exports carry their task table on a sheet named
//! `Tasks`; its absence is fatal. Cell values are coerced to text before
//! normalization so the same lenient parsing applies to both formats.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use plannergantt_core::{RawTask, EXPORT_DATE_FORMAT};

use crate::{assign_field, LoadError, TASKS_SHEET};

/// Read the `Tasks` sheet of a workbook export into raw rows
pub(crate) fn read(path: &Path) -> Result<Vec<RawTask>, LoadError> {
    let mut sheets = open_workbook_auto(path)?;

    if !sheets.sheet_names().iter().any(|name| name == TASKS_SHEET) {
        return Err(LoadError::MissingSheet {
            sheet: TASKS_SHEET.to_string(),
            file: path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        });
    }

    let range = sheets.worksheet_range(TASKS_SHEET)?;
    let mut rows_iter = range.rows();

    let Some(header_row) = rows_iter.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for row in rows_iter {
        let mut raw = RawTask::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(value) = row.get(index).and_then(cell_text) {
                assign_field(&mut raw, header, value);
            }
        }
        rows.push(raw);
    }
    Ok(rows)
}

/// Coerce a workbook cell to the text the normalizer expects.
///
/// Native date cells are re-rendered in the export date pattern so they
/// parse identically to CSV cells; anything unrepresentable is absent.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format(EXPORT_DATE_FORMAT).to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn fixture(sheet_name: &str, rows: &[&[&str]]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save(file.path()).unwrap();
        file
    }

    #[test]
    fn reads_the_tasks_sheet() {
        let file = fixture(
            "Tasks",
            &[
                &["Task Name", "Bucket Name", "Start date", "Due date"],
                &["Ship v2", "Engineering", "01/05/2026", "01/09/2026"],
                &["Plan v3", "Product", "", ""],
            ],
        );

        let rows = read(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("Ship v2"));
        assert_eq!(rows[0].due.as_deref(), Some("01/09/2026"));
        assert_eq!(rows[1].bucket.as_deref(), Some("Product"));
    }

    #[test]
    fn missing_tasks_sheet_is_fatal() {
        let file = fixture("Sheet1", &[&["Task Name"], &["Ship"]]);
        let err = read(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingSheet { ref sheet, .. } if sheet == "Tasks"
        ));
    }

    #[test]
    fn cell_text_coercions() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("x".into())), Some("x".into()));
        assert_eq!(cell_text(&Data::Float(3.0)), Some("3".into()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".into()));
        assert_eq!(cell_text(&Data::Bool(true)), Some("True".into()));
    }
}
