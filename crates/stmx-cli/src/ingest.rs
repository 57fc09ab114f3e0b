//! Statement file ingestion.
//!
//! Reads delimited text exports into a [`RawTable`]. Spreadsheet workbooks are
//! rejected up front.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use stmx_core::models::record::{RawRow, RawTable};
use stmx_core::{IngestError, Result};

const DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

/// Load a statement file.
pub fn read_statement(path: &Path) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" | "txt" | "tsv" => {}
        "xls" | "xlsx" => {
            return Err(unsupported(path, "spreadsheet workbooks are not supported, export the statement to CSV").into());
        }
        other => {
            return Err(unsupported(path, &format!("unknown extension '{}'", other)).into());
        }
    }

    let bytes = fs::read(path)?;
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(unsupported(path, "UTF-16 encoding").into());
    }
    let text = String::from_utf8(bytes).map_err(|_| unsupported(path, "file is not valid UTF-8"))?;

    parse_statement(path, &text)
}

/// Parse delimited statement text. The first record is the header row.
pub fn parse_statement(path: &Path, text: &str) -> Result<RawTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text.lines().find(|l| !l.trim().is_empty()).ok_or_else(|| {
        IngestError::NoHeader {
            path: path.to_path_buf(),
        }
    })?;
    let delimiter = detect_delimiter(header_line);
    debug!("Detected delimiter {:?} for {}", delimiter as char, path.display());

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| unsupported(path, &e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect(),
        None => {
            return Err(IngestError::NoHeader {
                path: path.to_path_buf(),
            }
            .into());
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| unsupported(path, &e.to_string()))?;
        let values = record
            .iter()
            .map(|v| {
                if v.trim().is_empty() {
                    None
                } else {
                    Some(v.to_string())
                }
            })
            .collect();
        rows.push(RawRow::new(values));
    }

    debug!("Read {} rows with {} columns", rows.len(), headers.len());
    Ok(RawTable::new(headers, rows))
}

/// Pick the candidate delimiter occurring most often in the header line.
fn detect_delimiter(header_line: &str) -> u8 {
    DELIMITERS
        .iter()
        .copied()
        .max_by_key(|d| header_line.bytes().filter(|b| b == d).count())
        .filter(|d| header_line.as_bytes().contains(d))
        .unwrap_or(b',')
}

fn unsupported(path: &Path, reason: &str) -> IngestError {
    IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use stmx_core::StmxError;
    use tempfile::NamedTempFile;

    fn create_temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_semicolon_with_bom() {
        let file = create_temp_file(
            ".csv",
            "\u{feff}Дата;Призначення платежу;Зараховано\n01.02.2023;ВП 12345678;\"1 000,00\"\n".as_bytes(),
        );
        let table = read_statement(file.path()).unwrap();

        assert_eq!(table.headers, vec!["Дата", "Призначення платежу", "Зараховано"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get(2), Some("1 000,00"));
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let file = create_temp_file(".csv", b"A,B,C\n1,,3\n4\n");
        let table = read_statement(file.path()).unwrap();

        assert_eq!(table.rows[0].get(1), None);
        assert_eq!(table.rows[0].get(2), Some("3"));
        assert_eq!(table.rows[1].get(2), None);
    }

    #[test]
    fn test_tab_delimiter() {
        let table = parse_statement(Path::new("x.tsv"), "A\tB\n1\t2\n").unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows[0].get(1), Some("2"));
    }

    #[test]
    fn test_excel_rejected() {
        let file = create_temp_file(".xlsx", b"PK");
        let err = read_statement(file.path()).unwrap_err();
        assert!(matches!(
            err,
            StmxError::Ingest(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_utf16_rejected() {
        let file = create_temp_file(".csv", &[0xFF, 0xFE, b'A', 0]);
        assert!(matches!(
            read_statement(file.path()),
            Err(StmxError::Ingest(IngestError::UnsupportedFormat { .. }))
        ));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let file = create_temp_file(".csv", b"");
        assert!(matches!(
            read_statement(file.path()),
            Err(StmxError::Ingest(IngestError::NoHeader { .. }))
        ));
    }
}
