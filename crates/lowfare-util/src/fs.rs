use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, trace};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// Rows that can be laid out as a spreadsheet table.
pub trait Tabular {
    /// Column names, in order.
    fn header() -> &'static [&'static str];

    /// One cell per column of [`Tabular::header`].
    fn cells(&self) -> Vec<Cell>;
}

/// Write `rows` to a `.csv` file at `path`; the header row comes from the serde field names.
pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    debug!("writing {} rows to {}", rows.len(), path.display());

    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    trace!("{} written", path.display());
    Ok(())
}

/// Write `rows` to a single-sheet `.xlsx` workbook at `path`, with a bold header row.
pub fn write_xlsx<T: Tabular>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    debug!("writing {} rows to {}", rows.len(), path.display());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, name) in T::header().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(r, col, text)?;
                }
                Cell::Number(num) => {
                    worksheet.write_number(r, col, num)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    trace!("{} written", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        #[serde(rename = "unitPrice")]
        unit_price: f64,
        note: Option<&'static str>,
    }

    impl Tabular for Row {
        fn header() -> &'static [&'static str] {
            &["name", "unitPrice", "note"]
        }

        fn cells(&self) -> Vec<Cell> {
            vec![
                Cell::Text(self.name.to_string()),
                Cell::Number(self.unit_price),
                self.note.map_or(Cell::Empty, |n| Cell::Text(n.to_string())),
            ]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "a", unit_price: 1.5, note: None },
            Row { name: "b", unit_price: 20.0, note: Some("x") },
        ]
    }

    #[test]
    fn csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["name,unitPrice,note", "a,1.5,", "b,20.0,x"]);
    }

    #[test]
    fn xlsx_is_a_zip_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        write_xlsx(&path, &rows()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
