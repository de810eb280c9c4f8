//! Spreadsheet output: a statically declared column schema over [`OutputRow`]
//! and the XLSX writer that serializes an ordered row sequence.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::{OutputRow, TcxError};

impl From<rust_xlsxwriter::XlsxError> for TcxError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        TcxError::Workbook(err.to_string())
    }
}

/// A single rendered cell value. Zero-valued cells are left blank in the
/// artifact; that is a display convention applied here at the writer
/// boundary, not a property of the row data.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Number(f64),
    Int(i64),
    Text(&'static str),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Number(value) => *value == 0.0,
            Cell::Int(value) => *value == 0,
            Cell::Text(text) => text.is_empty(),
        }
    }

    fn rendered(&self) -> String {
        match self {
            Cell::Number(value) => format!("{}", value),
            Cell::Int(value) => value.to_string(),
            Cell::Text(text) => (*text).to_string(),
        }
    }
}

pub struct Column {
    pub header: &'static str,
    pub value: fn(&OutputRow) -> Cell,
}

/// Ordered output schema. The internal raw distance deliberately has no
/// column here.
pub const COLUMNS: [Column; 6] = [
    Column {
        header: "Latitude",
        value: |row| Cell::Number(row.latitude),
    },
    Column {
        header: "Longitude",
        value: |row| Cell::Number(row.longitude),
    },
    Column {
        header: "Distance",
        value: |row| Cell::Number(row.distance_km),
    },
    Column {
        header: "Altitude",
        value: |row| Cell::Number(row.altitude_m),
    },
    Column {
        header: "Time",
        value: |row| Cell::Int(row.time_unix),
    },
    Column {
        header: "Marker",
        value: |row| Cell::Text(row.marker_text()),
    },
];

/// Widest rendered text per column, headers included, blank cells excluded.
fn column_widths(rows: &[OutputRow]) -> Vec<usize> {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.header.chars().count()).collect();
    for row in rows {
        for (idx, column) in COLUMNS.iter().enumerate() {
            let cell = (column.value)(row);
            if !cell.is_blank() {
                widths[idx] = widths[idx].max(cell.rendered().chars().count());
            }
        }
    }
    widths
}

/// Write the row sequence as a single-sheet XLSX workbook: one header row,
/// one data row per [`OutputRow`] in order, zero-valued fields left blank,
/// and each column sized to its widest text plus a margin.
pub fn write_workbook(rows: &[OutputRow], sheet_name: &str, path: &Path) -> Result<(), TcxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, column) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, column.header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let sheet_row = (idx + 1) as u32;
        for (col, column) in COLUMNS.iter().enumerate() {
            let cell = (column.value)(row);
            if cell.is_blank() {
                continue;
            }
            match cell {
                Cell::Number(value) => worksheet.write_number(sheet_row, col as u16, value)?,
                Cell::Int(value) => worksheet.write_number(sheet_row, col as u16, value as f64)?,
                Cell::Text(text) => worksheet.write_string(sheet_row, col as u16, text)?,
            };
        }
    }

    for (col, width) in column_widths(rows).iter().enumerate() {
        worksheet.set_column_width(col as u16, (width + 2) as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}
