use crate::anprank::*;

use log::{debug, info};
use snafu::prelude::*;

use serde::{Deserialize, Serialize};

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "analysisName")]
    pub analysis_name: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    pub delimiter: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

/// Replaces the aliases used to find the column of a criterion.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CriterionSettings {
    pub id: String,
    pub aliases: Option<Vec<String>>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JudgmentSettings {
    pub row: String,
    pub column: String,
    pub intensity: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InnerDependencySettings {
    pub target: String,
    pub sources: Vec<String>,
    pub judgments: Option<Vec<JudgmentSettings>>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(rename = "outerJudgments")]
    pub outer_judgments: Option<Vec<JudgmentSettings>>,
    #[serde(rename = "innerDependencies")]
    pub inner_dependencies: Option<Vec<InnerDependencySettings>>,
    #[serde(rename = "limitPower")]
    pub limit_power: Option<u32>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnpConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "inputSource")]
    pub input_source: Option<InputSource>,
    pub criteria: Option<Vec<CriterionSettings>>,
    pub network: Option<NetworkSettings>,
    #[serde(rename = "consistencyThreshold")]
    pub consistency_threshold: Option<f64>,
}

pub fn parse_config(contents: &str, path: &str) -> AnpResult<AnpConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu { path })
}

pub fn read_config(path: &str) -> AnpResult<AnpConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config = parse_config(&contents, path)?;
    info!("Read configuration {:?}", path);
    Ok(config)
}

pub fn read_reference(path: &str) -> AnpResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

fn judgments(settings: &[JudgmentSettings]) -> Vec<Judgment> {
    settings
        .iter()
        .map(|j| Judgment::new(&j.row, &j.column, j.intensity))
        .collect()
}

/// Turns the configuration into the settings of the analysis. Everything
/// that is not configured keeps the default of the library.
pub fn validate_settings(config: &AnpConfig) -> AnpResult<AnalysisSettings> {
    let mut settings = AnalysisSettings::default();

    for cs in config.criteria.iter().flatten() {
        let criterion = match settings.criteria.iter_mut().find(|c| c.id == cs.id) {
            Some(c) => c,
            None => {
                whatever!("Unknown criterion {:?} in the configuration", cs.id)
            }
        };
        if let Some(aliases) = &cs.aliases {
            debug!("validate_settings: aliases of {}: {:?}", cs.id, aliases);
            criterion.aliases = aliases.clone();
        }
    }

    if let Some(network) = &config.network {
        if let Some(outer) = &network.outer_judgments {
            settings.network.outer = judgments(outer);
        }
        if let Some(inner) = &network.inner_dependencies {
            settings.network.inner = inner
                .iter()
                .map(|dep| InnerDependence {
                    target: dep.target.clone(),
                    sources: dep.sources.clone(),
                    judgments: judgments(dep.judgments.as_deref().unwrap_or(&[])),
                })
                .collect();
        }
        match network.limit_power {
            Some(0) => {
                whatever!("limitPower must be at least 1")
            }
            Some(p) => settings.network.limit_power = p,
            None => {}
        }
    }

    match config.consistency_threshold {
        Some(t) if t.is_finite() && t > 0.0 => settings.consistency_threshold = t,
        Some(t) => {
            whatever!("consistencyThreshold must be positive, got {}", t)
        }
        None => {}
    }

    Ok(settings)
}
