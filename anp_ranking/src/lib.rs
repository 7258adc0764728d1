/*!
Ranking of candidate business locations with the Analytic Network Process.

The input is a [`Table`]: one row per alternative, the label in the first
column and the raw values of the criteria in the other columns. The
[`run_analysis`] pipeline

1. finds the column of every criterion from the header,
2. turns every cell into a score between 1 and 5,
3. compares the alternatives pairwise under each criterion and derives their
   local priorities,
4. derives the global weights of the criteria from the limit of the
   supermatrix of the criteria network,
5. combines both into a final score and ranks the alternatives.

```
use anp_ranking::*;

let headers = ["Lokasi", "Sewa", "Penjualan", "Bahan baku", "Fasilitas", "Persaingan"];
let text = |s: &str| Cell::Text(s.to_string());
let table = Table::new(
    headers.iter().map(|s| s.to_string()).collect(),
    vec![
        vec![text("Pasar"), text("500 ribu"), text("100 porsi"), text("mudah"), text("wifi, kursi"), text("ketat")],
        vec![text("Kampus"), text("4 juta"), text("50 porsi"), text("sulit"), text("kursi"), text("belum ada")],
    ],
);
let result = run_analysis(&table, &AnalysisSettings::default())?;
assert_eq!(result.ranking[0].label, "Pasar");
# Ok::<(), AnalysisErrors>(())
```

See the [manual] for the details of the scoring rules and of the network.
*/

mod columns;
mod config;
pub mod manual;
mod matrix;
mod normalize;
mod pairwise;
mod revenue;
mod supermatrix;
mod synthesis;

use log::{debug, info, warn};
use std::collections::HashSet;

pub use crate::columns::{detect_columns, resolve_columns};
pub use crate::config::*;
pub use crate::matrix::Matrix;
pub use crate::normalize::{normalize, MAX_SCORE, MIN_SCORE};
pub use crate::pairwise::{build_comparison_matrix, judgment_matrix, random_index, solve, Priorities};
pub use crate::revenue::{parse_currency, project_revenue};
pub use crate::supermatrix::{build_supermatrix, criteria_weights, limit_vector, Supermatrix};
pub use crate::synthesis::{global_scores, summary, synthesize};

/// The criterion whose column holds the sales figures.
pub const SALES_CRITERION: &str = "C2";

/// Every criterion must be a node of the network, and the reverse.
fn check_network(settings: &AnalysisSettings) -> Result<(), AnalysisErrors> {
    let in_settings: HashSet<&String> = settings.criteria.iter().map(|c| &c.id).collect();
    let in_network: HashSet<&String> = settings.network.criteria.iter().collect();
    let mut unmatched: Vec<String> = in_settings
        .symmetric_difference(&in_network)
        .map(|s| s.to_string())
        .collect();
    if unmatched.is_empty() {
        Ok(())
    } else {
        unmatched.sort();
        Err(AnalysisErrors::InvalidJudgment(format!(
            "criteria and network do not match on {}",
            unmatched.join(", ")
        )))
    }
}

/// Runs the full analysis of a table of alternatives.
///
/// Fails if a criterion has no column, or if the network of the settings is
/// not valid. The content of the cells never causes a failure.
pub fn run_analysis(
    table: &Table,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, AnalysisErrors> {
    if table.headers.is_empty() {
        return Err(AnalysisErrors::EmptyTable);
    }
    let columns = resolve_columns(&table.headers, &settings.criteria)?;
    check_network(settings)?;
    let threshold = settings.consistency_threshold;
    let criteria_weights = criteria_weights(&settings.network, threshold)?;
    if criteria_weights.report.status == ConsistencyStatus::LowConsistency {
        warn!(
            "The criteria judgments have a low consistency (CR={:.4})",
            criteria_weights.report.cr
        );
    }

    let rows = table.non_empty_rows();
    info!(
        "Processing {} alternatives over {} criteria",
        rows.len(),
        settings.criteria.len()
    );
    let labels: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| alternative_label(idx, row))
        .collect();

    let mut local_priorities: Vec<(String, Vec<f64>)> = Vec::new();
    let mut criterion_consistency: Vec<(String, ConsistencyReport)> = Vec::new();
    let mut scores: Vec<Vec<(String, f64)>> = vec![Vec::new(); rows.len()];
    for (criterion, col) in settings.criteria.iter().zip(columns.iter()) {
        let criterion_scores: Vec<f64> = rows.iter().map(|r| normalize(criterion, &r[*col])).collect();
        debug!("run_analysis: {} scores: {:?}", criterion.id, criterion_scores);
        for (alt_scores, s) in scores.iter_mut().zip(criterion_scores.iter()) {
            alt_scores.push((criterion.id.clone(), *s));
        }

        let priorities = solve(&build_comparison_matrix(&criterion_scores));
        let report = ConsistencyReport::new(priorities.ci, priorities.cr, threshold);
        if report.status == ConsistencyStatus::LowConsistency {
            warn!(
                "Comparisons under {} have a low consistency (CR={:.4})",
                criterion.id, priorities.cr
            );
        }
        criterion_consistency.push((criterion.id.clone(), report));
        local_priorities.push((criterion.id.clone(), priorities.weights));
    }

    let global = global_scores(&local_priorities, &criteria_weights.weights);
    let ranking = synthesize(&local_priorities, &criteria_weights.weights, &labels);
    let alternatives: Vec<Alternative> = labels
        .iter()
        .zip(scores)
        .zip(global.iter())
        .map(|((label, scores), global_score)| Alternative {
            label: label.clone(),
            scores,
            global_score: *global_score,
        })
        .collect();

    let summary = summary(&ranking, &criteria_weights.report);
    info!("{}", summary);

    Ok(AnalysisResult {
        ranking,
        alternatives,
        criteria_weights: criteria_weights.weights,
        consistency: criteria_weights.report,
        criterion_consistency,
        summary,
    })
}

/// Projects the yearly revenue of the alternatives from their sales column.
pub fn revenue_projection(
    table: &Table,
    settings: &AnalysisSettings,
) -> Result<Vec<RevenueProjection>, AnalysisErrors> {
    let sales = settings
        .criteria
        .iter()
        .find(|c| c.id == SALES_CRITERION)
        .ok_or(AnalysisErrors::MissingRevenueColumn)?;
    project_revenue(table, sales)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn survey() -> Table {
        Table::new(
            headers(&[
                "Nama Lokasi",
                "Harga Sewa",
                "Penjualan",
                "Bahan Baku",
                "Fasilitas",
                "Persaingan",
            ]),
            vec![
                vec![
                    text("Dekat Kampus"),
                    text("2 juta / tahun"),
                    text("100 porsi"),
                    text("Mudah"),
                    text("wifi, kulkas, kursi"),
                    text("Persaingan ketat"),
                ],
                vec![
                    text("Pasar Pagi"),
                    text("500 ribu"),
                    text("50 porsi"),
                    text("Sangat mudah"),
                    text("kursi"),
                    text("Cukup"),
                ],
                vec![Cell::Empty, text(""), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
                vec![
                    text("Ruko Jalan Raya"),
                    text("7 juta"),
                    text("5-10 porsi"),
                    text("Agak sulit"),
                    text("tidak ada"),
                    text("Belum ada pesaing"),
                ],
            ],
        )
    }

    #[test]
    fn full_analysis() {
        init();
        let res = run_analysis(&survey(), &AnalysisSettings::default()).unwrap();
        assert_eq!(res.ranking.len(), 3);
        assert_eq!(res.alternatives.len(), 3);
        assert_eq!(res.alternatives[2].label, "Ruko Jalan Raya");
        assert_eq!(
            res.alternatives[0].scores,
            vec![
                ("C1".to_string(), 3.0),
                ("C2".to_string(), 4.0),
                ("C3".to_string(), 3.0),
                ("C4".to_string(), 5.0),
                ("C5".to_string(), 1.0),
            ]
        );
        let total: f64 = res.ranking.iter().map(|r| r.score).sum();
        assert!((total - 1.0).abs() < 1e-9);
        let weights: f64 = res.criteria_weights.iter().map(|(_, w)| w).sum();
        assert!((weights - 1.0).abs() < 1e-9);
        assert_eq!(res.criterion_consistency.len(), 5);
        assert_eq!(res.ranking[2].label, "Ruko Jalan Raya");
        assert!(res.summary.contains(&res.ranking[0].label));
        for w in res.ranking.windows(2) {
            assert!(w[0].score >= w[1].score);
        }
    }

    #[test]
    fn pre_scored_table() {
        init();
        let c = |i: usize, cols: [f64; 5]| {
            let mut row = vec![text(&format!("L{}", i))];
            row.extend(cols.iter().map(|x| Cell::Number(*x)));
            row
        };
        let table = Table::new(
            headers(&["Alternatif", "C1", "C2", "C3", "C4", "C5"]),
            vec![
                c(1, [1.0, 3.0, 5.0, 4.0, 2.0]),
                c(2, [1.0, 1.0, 4.0, 4.0, 1.0]),
                c(3, [1.0, 2.0, 5.0, 4.0, 3.0]),
                c(4, [2.0, 1.0, 5.0, 4.0, 1.0]),
                c(5, [2.0, 1.0, 5.0, 3.0, 3.0]),
            ],
        );
        let res = run_analysis(&table, &AnalysisSettings::default()).unwrap();
        let order: Vec<&str> = res.ranking.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(order, vec!["L1", "L3", "L5", "L4", "L2"]);
        assert!((res.ranking[0].score - 0.264_229).abs() < 1e-5);
    }

    #[test]
    fn same_input_same_output() {
        let settings = AnalysisSettings::default();
        let first = run_analysis(&survey(), &settings).unwrap();
        let second = run_analysis(&survey(), &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_column_stops_the_analysis() {
        let mut table = survey();
        table.headers[5] = "Catatan".to_string();
        assert_eq!(
            run_analysis(&table, &AnalysisSettings::default()),
            Err(AnalysisErrors::IncompleteCriteria {
                missing: vec!["C5".to_string()]
            })
        );
    }

    #[test]
    fn empty_tables() {
        let settings = AnalysisSettings::default();
        assert_eq!(
            run_analysis(&Table::new(vec![], vec![]), &settings),
            Err(AnalysisErrors::EmptyTable)
        );
        let mut no_rows = survey();
        no_rows.rows.clear();
        let res = run_analysis(&no_rows, &settings).unwrap();
        assert!(res.ranking.is_empty());
        assert!(res.summary.starts_with("No alternative"));
    }

    #[test]
    fn single_alternative() {
        let mut table = survey();
        table.rows.truncate(1);
        let res = run_analysis(&table, &AnalysisSettings::default()).unwrap();
        assert_eq!(res.ranking.len(), 1);
        assert!((res.ranking[0].score - 1.0).abs() < 1e-9);
        assert!(res.criterion_consistency.iter().all(|(_, r)| r.cr == 0.0));
    }

    #[test]
    fn network_must_cover_the_criteria() {
        let mut settings = AnalysisSettings::default();
        settings.criteria.pop();
        let mut table = survey();
        table.headers.pop();
        match run_analysis(&table, &settings) {
            Err(AnalysisErrors::InvalidJudgment(msg)) => assert!(msg.contains("C5")),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn revenue_of_the_survey() {
        let res = revenue_projection(&survey(), &AnalysisSettings::default()).unwrap();
        assert_eq!(res.len(), 3);
        assert_eq!(res[0].monthly, 100.0);
        assert_eq!(res[0].yearly, 1200.0);
    }
}
