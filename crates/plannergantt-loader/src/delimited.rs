//! Flat delimited (CSV) export reading.

use std::path::Path;

use plannergantt_core::RawTask;

use crate::{assign_field, LoadError};

/// Read every record of a CSV export into raw rows.
///
/// The header row names the columns; surrounding whitespace on header cells
/// is trimmed before matching. Short records simply leave trailing fields
/// absent.
pub(crate) fn read(path: &Path) -> Result<Vec<RawTask>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut raw = RawTask::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(index) {
                assign_field(&mut raw, header, value.to_string());
            }
        }
        rows.push(raw);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_recognized_columns() {
        let file = write_csv(
            "Task Name,Bucket Name,Assigned To,Progress,Start date,Due date\n\
             Ship v2,Engineering,Alice;Bob,In progress,01/05/2026,01/09/2026\n",
        );
        let rows = read(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Ship v2"));
        assert_eq!(rows[0].bucket.as_deref(), Some("Engineering"));
        assert_eq!(rows[0].assigned_to.as_deref(), Some("Alice;Bob"));
        assert_eq!(rows[0].due.as_deref(), Some("01/09/2026"));
    }

    #[test]
    fn trims_header_whitespace() {
        let file = write_csv(" Task Name , Start date \nShip,01/05/2026\n");
        let rows = read(file.path()).unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("Ship"));
        assert_eq!(rows[0].start.as_deref(), Some("01/05/2026"));
    }

    #[test]
    fn unknown_columns_pass_through_unused() {
        let file = write_csv("Task Name,Checklist Items,Start date\nShip,3,01/05/2026\n");
        let rows = read(file.path()).unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("Ship"));
        assert_eq!(rows[0].start.as_deref(), Some("01/05/2026"));
    }

    #[test]
    fn short_records_leave_fields_absent() {
        let file = write_csv("Task Name,Start date,Due date\nShip,01/05/2026\n");
        let rows = read(file.path()).unwrap();
        assert_eq!(rows[0].start.as_deref(), Some("01/05/2026"));
        assert_eq!(rows[0].due, None);
    }
}
