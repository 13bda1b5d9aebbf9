// column_loader.rs
use calamine::{open_workbook_auto, DataType, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

/// One column pulled out of one spreadsheet, row order preserved.
/// Duplicates and blanks stay in; normalization happens at compare time.
#[derive(Debug, Clone)]
pub struct ColumnValues {
    pub source: String,
    pub column: String,
    pub values: Vec<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not parse '{path}' as a spreadsheet: {detail}")]
    UnreadableFormat { path: String, detail: String },

    #[error("Column '{column}' not found in '{path}'. Headers on offer: {available}")]
    ColumnNotFound {
        column: String,
        path: String,
        available: String,
    },

    #[error("'{path}' has no header row, nothing to resolve a column against")]
    EmptyFile { path: String },
}

/// Extracts the values under `column` from a csv/xls/xlsx file.
///
/// A file with a header row but zero data rows loads fine and comes back
/// with an empty value list; `EmptyFile` only fires when there is no header
/// row at all.
pub fn load_column(path: &Path, column: &str) -> Result<ColumnValues, LoadError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_csv_column(path, column),
        "xls" | "xlsx" => load_excel_column(path, column),
        _ => Err(LoadError::UnreadableFormat {
            path: display_name(path),
            detail: "unsupported file extension, codebro speaks csv/xls/xlsx".to_string(),
        }),
    }
}

fn load_csv_column(path: &Path, column: &str) -> Result<ColumnValues, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::UnreadableFormat {
            path: display_name(path),
            detail: e.to_string(),
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::UnreadableFormat {
            path: display_name(path),
            detail: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(LoadError::EmptyFile {
            path: display_name(path),
        });
    }

    let index = resolve_column(&headers, column).ok_or_else(|| LoadError::ColumnNotFound {
        column: column.to_string(),
        path: display_name(path),
        available: headers.join(", "),
    })?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::UnreadableFormat {
            path: display_name(path),
            detail: e.to_string(),
        })?;
        // Short rows read as blank cells; the comparator discards them.
        values.push(record.get(index).unwrap_or("").to_string());
    }

    Ok(ColumnValues {
        source: display_name(path),
        column: headers[index].clone(),
        values,
    })
}

fn load_excel_column(path: &Path, column: &str) -> Result<ColumnValues, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::UnreadableFormat {
        path: display_name(path),
        detail: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::UnreadableFormat {
            path: display_name(path),
            detail: "workbook has no sheets".to_string(),
        })?
        .map_err(|e| LoadError::UnreadableFormat {
            path: display_name(path),
            detail: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| LoadError::EmptyFile {
        path: display_name(path),
    })?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_to_string(cell).trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::EmptyFile {
            path: display_name(path),
        });
    }

    let index = resolve_column(&headers, column).ok_or_else(|| LoadError::ColumnNotFound {
        column: column.to_string(),
        path: display_name(path),
        available: headers.join(", "),
    })?;

    let values = rows
        .map(|row| row.get(index).map(cell_to_string).unwrap_or_default())
        .collect();

    Ok(ColumnValues {
        source: display_name(path),
        column: headers[index].clone(),
        values,
    })
}

/// Header-to-index resolution, done once per load: exact match first, then
/// case-insensitive, then a 1-based positional number.
fn resolve_column(headers: &[String], column: &str) -> Option<usize> {
    let wanted = column.trim();

    if let Some(index) = headers.iter().position(|h| h == wanted) {
        return Some(index);
    }

    if let Some(index) = headers.iter().position(|h| h.eq_ignore_ascii_case(wanted)) {
        return Some(index);
    }

    if let Ok(serial) = wanted.parse::<usize>() {
        if serial > 0 && serial <= headers.len() {
            return Some(serial - 1);
        }
    }

    None
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}
