use anp_ranking::{Cell, Table};
use calamine::{open_workbook_auto, DataType, Range, Reader};
use log::debug;
use snafu::prelude::*;

use crate::anprank::{
    io_common::{clean_header, text_cell},
    *,
};

fn excel_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::String(s) => text_cell(s),
        DataType::Error(e) => {
            debug!("excel_cell: error cell {:?} read as empty", e);
            Cell::Empty
        }
        other => Cell::Text(other.to_string()),
    }
}

/// Reads the named worksheet, or the first one of the workbook. The first
/// row is the header.
pub fn read_excel_table(path: &str, worksheet_name: Option<&str>) -> AnpResult<Table> {
    let wrange = get_range(path, worksheet_name)?;
    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyInputSnafu { path })?;
    let headers: Vec<String> = header
        .iter()
        .map(|c| clean_header(&excel_cell(c).as_text()))
        .collect();
    debug!("read_excel_table: headers: {:?}", headers);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let cells: Vec<Cell> = row.iter().map(excel_cell).collect();
        debug!("read_excel_table: idx: {:?} row: {:?}", idx, cells);
        rows.push(cells);
    }
    Ok(Table::new(headers, rows))
}

fn get_range(path: &str, worksheet_name_o: Option<&str>) -> AnpResult<Range<DataType>> {
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    // Without a worksheet name, use the first worksheet.
    let worksheet_name = match worksheet_name_o {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .context(EmptyInputSnafu { path })?,
    };
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    workbook
        .worksheet_range(&worksheet_name)
        .context(MissingWorksheetSnafu {
            name: worksheet_name.clone(),
            path,
        })?
        .context(OpeningExcelSnafu { path })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testdata(name: &str) -> String {
        format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn cell_types() {
        assert_eq!(excel_cell(&DataType::Empty), Cell::Empty);
        assert_eq!(excel_cell(&DataType::Int(4)), Cell::Number(4.0));
        assert_eq!(excel_cell(&DataType::Float(2.5)), Cell::Number(2.5));
        assert_eq!(
            excel_cell(&DataType::String(" 7 juta ".to_string())),
            Cell::Text("7 juta".to_string())
        );
        assert_eq!(excel_cell(&DataType::String("".to_string())), Cell::Empty);
        assert_eq!(excel_cell(&DataType::Bool(true)), Cell::Text("true".to_string()));
    }

    #[test]
    fn first_worksheet() {
        let table = read_excel_table(&testdata("locations.xlsx"), None).unwrap();
        assert_eq!(table.headers[0], "Nama Lokasi");
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][0], Cell::Text("Dekat Kampus".to_string()));
        assert_eq!(table.rows[1][1], Cell::Text("500 ribu".to_string()));
    }

    #[test]
    fn named_worksheet() {
        let table = read_excel_table(&testdata("locations.xlsx"), Some("Skor")).unwrap();
        assert_eq!(table.headers, vec!["Alternatif", "C1", "C2", "C3", "C4", "C5"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], Cell::Number(1.0));
        assert_eq!(table.rows[1][5], Cell::Number(3.0));
    }

    #[test]
    fn missing_worksheet() {
        assert!(matches!(
            read_excel_table(&testdata("locations.xlsx"), Some("Lainnya")),
            Err(AnpError::MissingWorksheet { .. })
        ));
    }
}
