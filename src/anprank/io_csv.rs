// Primitives for reading CSV files.

use std::fs::File;

use anp_ranking::{Cell, Table};
use log::debug;
use snafu::prelude::*;

use crate::anprank::{
    io_common::{clean_header, text_cell},
    *,
};

/// Reads a table with the given delimiter. Without one, ';' is tried first
/// and ',' is used when the header does not split with ';'.
pub fn read_csv_table(path: &str, delimiter: Option<u8>) -> AnpResult<Table> {
    match delimiter {
        Some(d) => read_with_delimiter(path, d),
        None => {
            let table = read_with_delimiter(path, b';')?;
            if table.headers.len() > 1 {
                Ok(table)
            } else {
                debug!("read_csv_table: single column with ';', reading {:?} with ','", path);
                read_with_delimiter(path, b',')
            }
        }
    }
}

fn read_with_delimiter(path: &str, delimiter: u8) -> AnpResult<Table> {
    let mut records = get_records(path, delimiter)?;
    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu { lineno: 1usize })?,
        None => return EmptyInputSnafu { path }.fail(),
    };
    let headers: Vec<String> = header.iter().map(clean_header).collect();
    debug!(
        "read_csv_table: delimiter: {:?} headers: {:?}",
        delimiter as char, headers
    );

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let row: Vec<Cell> = line.iter().map(text_cell).collect();
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, row);
        rows.push(row);
    }
    Ok(Table::new(headers, rows))
}

fn get_records(path: &str, delimiter: u8) -> AnpResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testdata(name: &str) -> String {
        format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn semicolon_table() {
        let table = read_csv_table(&testdata("locations.csv"), None).unwrap();
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.headers[0], "Nama Lokasi");
        assert_eq!(table.rows.len(), 4);
        assert_eq!(
            table.rows[0][4],
            Cell::Text("wifi, kulkas, kursi".to_string())
        );
        // The blank line separating the groups is kept, the analysis skips it.
        assert!(table.rows[2].iter().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn comma_fallback() {
        let table = read_csv_table(&testdata("locations_comma.csv"), None).unwrap();
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.headers[2], "Omzet");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0][4],
            Cell::Text("wifi, kulkas, kursi".to_string())
        );
    }

    #[test]
    fn forced_delimiter() {
        // Forcing ';' on a comma file gives a single column.
        let table = read_csv_table(&testdata("locations_comma.csv"), Some(b';')).unwrap();
        assert_eq!(table.headers.len(), 1);
    }

    #[test]
    fn short_rows_are_kept() {
        let table = read_csv_table(&testdata("missing_column.csv"), None).unwrap();
        assert_eq!(table.headers.len(), 5);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_table(&testdata("nothing_here.csv"), None),
            Err(AnpError::CsvOpen { .. })
        ));
    }
}
