use log::{debug, info};

use crate::columns::detect_columns;
use crate::config::*;
use crate::normalize::magnitude;

const CURRENCY_UNITS: &[Unit] = &[
    Unit {
        marker: "miliar",
        factor: 1e9,
    },
    Unit {
        marker: "milyar",
        factor: 1e9,
    },
    Unit {
        marker: "juta",
        factor: 1e6,
    },
    Unit {
        marker: "jt",
        factor: 1e6,
    },
    Unit {
        marker: "ribu",
        factor: 1e3,
    },
    Unit {
        marker: "rb",
        factor: 1e3,
    },
];

/// Reads an amount of rupiah such as "Rp 5.000.000" or "50 juta".
/// Text without digits is worth 0.
pub fn parse_currency(raw: &str) -> f64 {
    let lowered = raw.to_lowercase().replace("rp", "");
    magnitude(&lowered, CURRENCY_UNITS).unwrap_or(0.0)
}

/// Projects the yearly revenue of every alternative from the monthly amount
/// found in its sales column.
pub fn project_revenue(table: &Table, sales: &Criterion) -> Result<Vec<RevenueProjection>, AnalysisErrors> {
    let column = detect_columns(&table.headers, std::slice::from_ref(sales))
        .first()
        .and_then(|(_, col)| *col)
        .ok_or(AnalysisErrors::MissingRevenueColumn)?;
    info!("Revenue column: {:?}", table.headers[column]);

    let res: Vec<RevenueProjection> = table
        .non_empty_rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let raw = row[column].as_text();
            let monthly = parse_currency(&raw);
            debug!("project_revenue: {:?} -> {}", raw, monthly);
            RevenueProjection {
                label: alternative_label(idx, row),
                raw,
                monthly,
                yearly: monthly * 12.0,
            }
        })
        .collect();
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> Criterion {
        Criterion::reference_set().remove(1)
    }

    #[test]
    fn currency_formats() {
        assert_eq!(parse_currency("50 Juta"), 50e6);
        assert_eq!(parse_currency("Rp 5.000.000"), 5e6);
        assert_eq!(parse_currency("Rp5.000.000,-"), 5e6);
        assert_eq!(parse_currency("2,5 jt"), 2.5e6);
        assert_eq!(parse_currency("750rb"), 750e3);
        assert_eq!(parse_currency("1 milyar"), 1e9);
        assert_eq!(parse_currency("belum ada"), 0.0);
    }

    #[test]
    fn yearly_projection() {
        let table = Table::new(
            vec!["Lokasi".to_string(), "Sewa".to_string(), "Omzet".to_string()],
            vec![
                vec![
                    Cell::Text("Pasar".to_string()),
                    Cell::Text("2 juta".to_string()),
                    Cell::Text("10 juta".to_string()),
                ],
                vec![Cell::Empty, Cell::Empty, Cell::Empty],
                vec![
                    Cell::Text("Kampus".to_string()),
                    Cell::Empty,
                    Cell::Number(4_500_000.0),
                ],
            ],
        );
        let res = project_revenue(&table, &sales()).unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].label, "Pasar");
        assert_eq!(res[0].monthly, 10e6);
        assert_eq!(res[0].yearly, 120e6);
        assert_eq!(res[1].raw, "4500000");
        assert_eq!(res[1].yearly, 54e6);
    }

    #[test]
    fn blank_labels_are_numbered() {
        let table = Table::new(
            vec!["Lokasi".to_string(), "Omzet".to_string()],
            vec![
                vec![Cell::Text("Pasar".to_string()), Cell::Text("1 juta".to_string())],
                vec![Cell::Empty, Cell::Empty],
                vec![Cell::Text("  ".to_string()), Cell::Text("3 juta".to_string())],
            ],
        );
        let res = project_revenue(&table, &sales()).unwrap();
        let labels: Vec<&str> = res.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Pasar", "Alternative 2"]);
        assert_eq!(res[1].yearly, 36e6);
    }

    #[test]
    fn missing_sales_column() {
        let table = Table::new(vec!["Lokasi".to_string(), "Sewa".to_string()], vec![]);
        assert_eq!(
            project_revenue(&table, &sales()),
            Err(AnalysisErrors::MissingRevenueColumn)
        );
    }
}
