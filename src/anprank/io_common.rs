use std::path::Path;

use anp_ranking::Cell;
use snafu::prelude::*;

use crate::anprank::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Excel,
}

impl InputType {
    pub fn from_name(name: &str) -> AnpResult<InputType> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "excel" | "xlsx" | "xls" | "ods" => Ok(InputType::Excel),
            _ => UnknownInputTypeSnafu { input_type: name }.fail(),
        }
    }

    /// The type of a file, from its extension.
    pub fn from_path(path: &str) -> AnpResult<InputType> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Ok(InputType::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputType::Excel),
            _ => UnknownInputTypeSnafu {
                input_type: format!("{} (from the extension of {})", extension, path),
            }
            .fail(),
        }
    }
}

/// The name of a file without its directory and extension.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

pub fn text_cell(raw: &str) -> Cell {
    match raw.trim() {
        "" => Cell::Empty,
        s => Cell::Text(s.to_string()),
    }
}

pub fn parse_delimiter(raw: &str) -> AnpResult<u8> {
    match raw {
        "\\t" | "\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => {
            whatever!("The delimiter must be a single character, got {:?}", s)
        }
    }
}
