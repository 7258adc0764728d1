use log::{debug, info, warn};

use anp_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::anprank::config_reader::*;
use crate::anprank::io_common::{parse_delimiter, simplify_file_name, InputType};
use crate::args::Args;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

#[derive(Debug, Snafu)]
pub enum AnpError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}: {source}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}: {source}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}: {source}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening Excel file {path}: {source}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The file {path} has no header row"))]
    EmptyInput { path: String },
    #[snafu(display("Error parsing JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary: {source}"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Unknown input type: {input_type} (expected csv or excel)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("No input file: use --input or the inputSource of the configuration"))]
    MissingInput {},
    #[snafu(display("Analysis failed: {source}"))]
    Analysis { source: AnalysisErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AnpResult<T> = Result<T, AnpError>;

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

fn report_js(report: &ConsistencyReport) -> JSValue {
    json!({
        "ci": round6(report.ci),
        "cr": round6(report.cr),
        "status": report.status.to_string()
    })
}

fn ranking_js(result: &AnalysisResult) -> Vec<JSValue> {
    // Same order as the ranking: stable sort on the global score.
    let mut ordered: Vec<&Alternative> = result.alternatives.iter().collect();
    ordered.sort_by(|a, b| b.global_score.total_cmp(&a.global_score));
    ordered
        .iter()
        .enumerate()
        .map(|(idx, alt)| {
            let mut scores: JSMap<String, JSValue> = JSMap::new();
            for (cid, score) in alt.scores.iter() {
                scores.insert(cid.clone(), json!(score));
            }
            json!({
                "rank": idx + 1,
                "label": alt.label,
                "score": round6(alt.global_score),
                "scores": scores
            })
        })
        .collect()
}

fn revenue_js(projections: &[RevenueProjection]) -> Vec<JSValue> {
    projections
        .iter()
        .map(|p| {
            json!({
                "label": p.label,
                "raw": p.raw,
                "monthly": p.monthly,
                "yearly": p.yearly
            })
        })
        .collect()
}

fn criteria_js(criteria: &[Criterion]) -> JSMap<String, JSValue> {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for c in criteria.iter() {
        res.insert(
            c.id.clone(),
            json!({
                "name": c.name,
                "direction": c.polarity.to_string()
            }),
        );
    }
    res
}

fn build_summary_js(
    analysis_name: &str,
    criteria: &[Criterion],
    result: &AnalysisResult,
    revenue: Option<&[RevenueProjection]>,
) -> JSValue {
    let mut weights: JSMap<String, JSValue> = JSMap::new();
    for (cid, w) in result.criteria_weights.iter() {
        weights.insert(cid.clone(), json!(round6(*w)));
    }
    let mut criterion_consistency: JSMap<String, JSValue> = JSMap::new();
    for (cid, report) in result.criterion_consistency.iter() {
        criterion_consistency.insert(cid.clone(), report_js(report));
    }

    let mut js = json!({
        "config": {
            "analysis": analysis_name,
            "alternatives": result.alternatives.len(),
            "criteria": criteria_js(criteria)
        },
        "weights": weights,
        "consistency": report_js(&result.consistency),
        "criterionConsistency": criterion_consistency,
        "ranking": ranking_js(result),
        "summary": result.summary
    });
    if let Some(projections) = revenue {
        js["revenue"] = JSValue::Array(revenue_js(projections));
    }
    js
}

/// Relative paths of the configuration are relative to its directory.
fn resolve_path(root: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        root.join(path).display().to_string()
    }
}

fn read_table(
    path: &str,
    input_type: InputType,
    delimiter: Option<u8>,
    worksheet_name: Option<&str>,
) -> AnpResult<Table> {
    info!("Attempting to read input file {:?} as {:?}", path, input_type);
    let table = match input_type {
        InputType::Csv => io_csv::read_csv_table(path, delimiter),
        InputType::Excel => io_excel::read_excel_table(path, worksheet_name),
    }?;
    info!(
        "Read {} rows and {} columns from {:?}",
        table.rows.len(),
        table.headers.len(),
        path
    );
    Ok(table)
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> AnpResult<()> {
    let summary_ref = read_reference(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!(
            "Difference detected between the computed summary and the reference summary {}",
            reference_path
        )
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

/// Runs an analysis from the command line arguments: reads the configuration
/// and the table, ranks the locations, writes the JSON summary and compares
/// it with the reference if one is given.
pub fn run(args: &Args) -> AnpResult<()> {
    let (config, root) = match args.config.as_deref() {
        Some(config_path) => {
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (read_config(config_path)?, root)
        }
        None => (AnpConfig::default(), PathBuf::new()),
    };
    debug!("config: {:?}", config);
    let settings = validate_settings(&config)?;

    let source = config.input_source.clone().unwrap_or_default();
    let input_path = match (args.input.as_deref(), source.file_path.as_deref()) {
        (Some(p), _) => p.to_string(),
        (None, Some(p)) => resolve_path(&root, p),
        (None, None) => return MissingInputSnafu {}.fail(),
    };
    let input_type = match args.input_type.as_deref().or(source.provider.as_deref()) {
        Some(name) => InputType::from_name(name)?,
        None => InputType::from_path(&input_path)?,
    };
    let delimiter = args
        .delimiter
        .as_deref()
        .or(source.delimiter.as_deref())
        .map(parse_delimiter)
        .transpose()?;
    let worksheet_name = args
        .excel_worksheet_name
        .as_deref()
        .or(source.excel_worksheet_name.as_deref());

    let table = read_table(&input_path, input_type, delimiter, worksheet_name)?;

    let result = run_analysis(&table, &settings).context(AnalysisSnafu {})?;
    let revenue = if args.revenue {
        Some(revenue_projection(&table, &settings).context(AnalysisSnafu {})?)
    } else {
        None
    };

    let output = config.output_settings.clone().unwrap_or_default();
    let analysis_name = output
        .analysis_name
        .clone()
        .unwrap_or_else(|| simplify_file_name(&input_path));
    let result_js = build_summary_js(
        &analysis_name,
        &settings.criteria,
        &result,
        revenue.as_deref(),
    );
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;

    let out_path = match (args.out.as_deref(), output.output_file.as_deref()) {
        (Some(p), _) => Some(p.to_string()),
        (None, Some("stdout")) => None,
        (None, Some(p)) => Some(resolve_path(&root, p)),
        (None, None) => None,
    };
    match out_path.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(p) => {
            info!("Writing summary to {:?}", p);
            fs::write(p, &pretty_js_stats).context(WritingFileSnafu { path: p })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.as_deref() {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn testdata(name: &str) -> String {
        format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn scratch_file(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("anprank-{}", std::process::id()));
        let _ = fs::create_dir_all(&dir);
        dir.join(name).display().to_string()
    }

    fn args(list: &[&str]) -> Args {
        let mut full = vec!["anprank"];
        full.extend_from_slice(list);
        Args::parse_from(full)
    }

    fn read_output(path: &str) -> JSValue {
        let contents = fs::read_to_string(path).unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    #[test]
    fn csv_survey_summary() {
        init();
        let out = scratch_file("survey.json");
        run(&args(&["--input", &testdata("locations.csv"), "--out", &out])).unwrap();
        let js = read_output(&out);

        assert_eq!(js["config"]["analysis"], json!("locations"));
        assert_eq!(js["config"]["alternatives"], json!(3));
        let ranking = js["ranking"].as_array().unwrap();
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0]["rank"], json!(1));
        assert_eq!(ranking[0]["label"], json!("Dekat Kampus"));
        assert_eq!(ranking[2]["label"], json!("Ruko Jalan Raya"));
        assert_eq!(ranking[0]["scores"]["C4"], json!(5.0));
        assert_eq!(js["config"]["criteria"]["C1"]["direction"], json!("cost"));
        assert_eq!(js["config"]["criteria"]["C2"]["direction"], json!("benefit"));
        assert_eq!(js["consistency"]["status"], json!("Valid"));
        assert_eq!(js["weights"].as_object().unwrap().len(), 5);
        assert!(js["summary"]
            .as_str()
            .unwrap()
            .starts_with("Best location is Dekat Kampus"));
        assert!(js.get("revenue").is_none());
    }

    #[test]
    fn excel_survey_matches_csv() {
        let csv_out = scratch_file("survey_csv.json");
        run(&args(&["--input", &testdata("locations.csv"), "--out", &csv_out])).unwrap();
        let excel_out = scratch_file("survey_excel.json");
        run(&args(&[
            "--input",
            &testdata("locations.xlsx"),
            "--out",
            &excel_out,
        ]))
        .unwrap();
        let csv_js = read_output(&csv_out);
        let excel_js = read_output(&excel_out);
        assert_eq!(excel_js["ranking"], csv_js["ranking"]);
        assert_eq!(excel_js["weights"], csv_js["weights"]);
    }

    #[test]
    fn configuration_file() {
        init();
        let out = scratch_file("configured.json");
        run(&args(&["--config", &testdata("config.json"), "--out", &out])).unwrap();
        let js = read_output(&out);
        assert_eq!(js["config"]["analysis"], json!("Warung makan 2024"));
        assert_eq!(js["config"]["alternatives"], json!(2));
        let ranking = js["ranking"].as_array().unwrap();
        assert_eq!(ranking[0]["label"], json!("Dekat Kampus"));
        assert!(js.get("revenue").is_none());
    }

    #[test]
    fn revenue_projection_output() {
        let out = scratch_file("revenue.json");
        run(&args(&[
            "--input",
            &testdata("locations.csv"),
            "--out",
            &out,
            "--revenue",
        ]))
        .unwrap();
        let js = read_output(&out);
        let revenue = js["revenue"].as_array().unwrap();
        assert_eq!(revenue.len(), 3);
        assert_eq!(revenue[0]["label"], json!("Dekat Kampus"));
        assert_eq!(revenue[0]["monthly"], json!(100.0));
        assert_eq!(revenue[0]["yearly"], json!(1200.0));
    }

    #[test]
    fn reference_comparison() {
        init();
        let out = scratch_file("reference.json");
        let input = testdata("locations.csv");
        run(&args(&["--input", &input, "--out", &out])).unwrap();

        // The output of a run is its own reference.
        let second = scratch_file("reference_second.json");
        run(&args(&[
            "--input", &input, "--out", &second, "--reference", &out,
        ]))
        .unwrap();

        let mut js = read_output(&out);
        js["summary"] = json!("something else");
        let altered = scratch_file("reference_altered.json");
        fs::write(&altered, serde_json::to_string_pretty(&js).unwrap()).unwrap();
        let res = run(&args(&[
            "--input", &input, "--out", &second, "--reference", &altered,
        ]));
        assert!(matches!(res, Err(AnpError::Whatever { .. })));
    }

    #[test]
    fn missing_column_is_reported() {
        let res = run(&args(&["--input", &testdata("missing_column.csv")]));
        match res {
            Err(AnpError::Analysis {
                source: AnalysisErrors::IncompleteCriteria { missing },
            }) => assert_eq!(missing, vec!["C5".to_string()]),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn input_is_required() {
        assert!(matches!(run(&args(&[])), Err(AnpError::MissingInput {})));
        assert!(matches!(
            run(&args(&["--input", &testdata("locations.csv"), "--input-type", "xml"])),
            Err(AnpError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn summary_rounding() {
        assert_eq!(round6(0.236_701_557_9), 0.236_702);
        assert_eq!(round6(1.0), 1.0);
    }
}
