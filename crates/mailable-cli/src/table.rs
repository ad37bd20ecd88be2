//! In-memory tabular data with CSV and Excel readers and writers.

use std::path::Path;

use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};

/// File family of a tabular input. Also selects the output format, so a CSV
/// run produces CSVs and an Excel run produces workbooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    pub(crate) fn from_path(path: &Path) -> anyhow::Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx" | "xls") => Ok(Self::Xlsx),
            _ => anyhow::bail!(
                "unsupported file extension for '{}'; expected .csv, .xlsx, or .xls",
                path.display()
            ),
        }
    }

    pub(crate) fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// A header row plus data rows, every cell a string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Table {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads a table from a CSV or Excel file, picking the reader by
    /// extension.
    pub(crate) fn read(path: &Path) -> anyhow::Result<Self> {
        match TableFormat::from_path(path)? {
            TableFormat::Csv => read_csv(path),
            TableFormat::Xlsx => read_xlsx(path),
        }
    }

    /// Position of the named header, if any.
    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub(crate) fn write(&self, path: &Path, format: TableFormat) -> anyhow::Result<()> {
        match format {
            TableFormat::Csv => self.write_csv(path),
            TableFormat::Xlsx => self.write_xlsx(path),
        }
    }

    fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        // Flexible on both ends: a ragged input row stays ragged instead of
        // failing the whole export.
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_xlsx(&self, path: &Path) -> anyhow::Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Validated_Addresses")?;

        let header_format = Format::new().set_bold();
        for (col_idx, header) in self.headers.iter().enumerate() {
            let col = u16::try_from(col_idx).context("too many columns for xlsx")?;
            sheet.write_string_with_format(0, col, header.as_str(), &header_format)?;
        }
        for (row_idx, row) in self.rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1).context("too many rows for xlsx")?;
            for (col_idx, cell) in row.iter().enumerate() {
                let col = u16::try_from(col_idx).context("too many columns for xlsx")?;
                sheet.write_string(row_num, col, cell.as_str())?;
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

fn read_csv(path: &Path) -> anyhow::Result<Table> {
    let content = read_file_as_utf8(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .with_context(|| format!("reading header row of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("reading {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

/// Read file bytes as UTF-8, falling back to Windows-1252 (common for
/// Excel-exported CSVs).
fn read_file_as_utf8(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&err.into_bytes());
            Ok(decoded.into_owned())
        }
    }
}

fn read_xlsx(path: &Path) -> anyhow::Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("workbook {} has no sheets", path.display()))?
        .with_context(|| format!("reading first sheet of {}", path.display()))?;

    let mut row_iter = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());
    let headers = row_iter.next().unwrap_or_default();
    let rows = row_iter.collect();

    Ok(Table { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
