// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One cell of the input table, as handed over by the readers.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Blank text and NaN numbers count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    /// The textual content of the cell. Empty cells and NaN become "".
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) if n.is_nan() => String::new(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{:.0}", n),
            Cell::Number(n) => format!("{}", n),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// A table of alternatives: the first column holds the labels, the other
/// columns hold the raw values for the criteria.
#[derive(PartialEq, Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Table {
        Table { headers, rows }
    }

    /// The rows that have at least one non-empty cell, padded to the header width.
    pub fn non_empty_rows(&self) -> Vec<Vec<Cell>> {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .map(|row| {
                let mut padded = row.clone();
                if padded.len() < self.headers.len() {
                    padded.resize(self.headers.len(), Cell::Empty);
                }
                padded
            })
            .collect()
    }
}

/// The label of the alternative in the given row of `non_empty_rows`: its
/// first cell, or "Alternative N" (counting from 1) when that cell is blank.
pub fn alternative_label(idx: usize, row: &[Cell]) -> String {
    let text = row.first().map(|c| c.as_text()).unwrap_or_default();
    match text.trim() {
        "" => format!("Alternative {}", idx + 1),
        s => s.to_string(),
    }
}

// ********* Criteria and scoring rules **********

/// The direction of a criterion.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Polarity {
    /// A higher raw value is better.
    Benefit,
    /// A lower raw value is better.
    Cost,
}

impl Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Benefit => write!(f, "benefit"),
            Polarity::Cost => write!(f, "cost"),
        }
    }
}

/// A predicate over the lowercased content of a cell.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Pattern {
    Contains(&'static str),
    /// All the fragments must appear, in any order.
    AllOf(&'static [&'static str]),
}

impl Pattern {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Contains(fragment) => text.contains(fragment),
            Pattern::AllOf(fragments) => fragments.iter().all(|f| text.contains(f)),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: Pattern,
    pub score: f64,
}

const fn contains(fragment: &'static str, score: f64) -> Rule {
    Rule {
        pattern: Pattern::Contains(fragment),
        score,
    }
}

const fn all_of(fragments: &'static [&'static str], score: f64) -> Rule {
    Rule {
        pattern: Pattern::AllOf(fragments),
        score,
    }
}

/// A multiplier applied to the magnitude when its marker is found in the cell.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Unit {
    pub marker: &'static str,
    pub factor: f64,
}

const fn unit(marker: &'static str, factor: f64) -> Unit {
    Unit { marker, factor }
}

/// A step function. `steps` are (exclusive upper bound, score) pairs in
/// increasing bound order; values past the last bound get `otherwise`.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct StepTable {
    pub steps: &'static [(f64, f64)],
    pub otherwise: f64,
}

impl StepTable {
    pub fn score(&self, value: f64) -> f64 {
        self.steps
            .iter()
            .find(|(bound, _)| value < *bound)
            .map(|(_, score)| *score)
            .unwrap_or(self.otherwise)
    }
}

/// How the raw cells of a criterion are turned into a score.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Scoring {
    /// An amount embedded in the text (price, volume), with optional unit markers.
    /// When no digits are present, the phrase rules are tried before falling
    /// back to `unknown`.
    Magnitude {
        units: &'static [Unit],
        steps: StepTable,
        phrases: &'static [Rule],
        unknown: f64,
    },
    /// Ordered phrase rules; the first match wins.
    Keywords {
        rules: &'static [Rule],
        default: f64,
    },
    /// A comma-separated list of items, scored by its length.
    Enumerated {
        steps: StepTable,
        none_markers: &'static [&'static str],
        /// Items starting with one of these are absent ("tidak ada wifi").
        negations: &'static [&'static str],
        override_keywords: &'static [&'static str],
        override_score: f64,
    },
}

/// An evaluation dimension of the alternatives.
#[derive(PartialEq, Debug, Clone)]
pub struct Criterion {
    /// Short code, such as `C1`.
    pub id: String,
    pub name: String,
    pub polarity: Polarity,
    /// Header fragments used to find the column of this criterion.
    pub aliases: Vec<String>,
    pub scoring: Scoring,
}

// Yearly rent in rupiah.
const RENT_UNITS: &[Unit] = &[
    unit("miliar", 1e9),
    unit("milyar", 1e9),
    unit("juta", 1e6),
    unit("jt", 1e6),
    unit("ribu", 1e3),
    unit("rb", 1e3),
];
const RENT_STEPS: StepTable = StepTable {
    steps: &[(1e6, 5.0), (2e6, 4.0), (4e6, 3.0), (7e6, 2.0)],
    otherwise: 1.0,
};
const RENT_PHRASES: &[Rule] = &[
    contains("gratis", 5.0),
    contains("sangat murah", 5.0),
    contains("sangat mahal", 1.0),
    contains("murah", 4.0),
    contains("sedang", 3.0),
    contains("mahal", 2.0),
];

// Daily sales, counted in portions or pieces.
const SALES_UNITS: &[Unit] = &[
    unit("kodi", 20.0),
    unit("lusin", 12.0),
    unit("ribu", 1e3),
    unit("porsi", 1.0),
    unit("ekor", 1.0),
    unit("pcs", 1.0),
];
const SALES_STEPS: StepTable = StepTable {
    steps: &[(15.0, 1.0), (50.0, 2.0), (100.0, 3.0), (150.0, 4.0)],
    otherwise: 5.0,
};
const SALES_PHRASES: &[Rule] = &[
    contains("sangat ramai", 5.0),
    contains("ramai", 4.0),
    contains("sedang", 3.0),
    contains("sepi", 1.0),
];

const MATERIAL_RULES: &[Rule] = &[
    all_of(&["tidak", "sulit"], 4.0),
    contains("agak sulit", 2.0),
    contains("sulit", 1.0),
    contains("langka", 1.0),
    contains("sangat mudah", 5.0),
    contains("melimpah", 5.0),
    contains("cukup mudah", 4.0),
    contains("mudah", 3.0),
];

const FACILITY_STEPS: StepTable = StepTable {
    steps: &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)],
    otherwise: 5.0,
};

const COMPETITION_RULES: &[Rule] = &[
    contains("belum ada", 5.0),
    contains("tidak ada", 5.0),
    all_of(&["tidak", "ketat"], 4.0),
    all_of(&["tidak", "mempengaruhi"], 4.0),
    contains("ketat", 1.0),
    contains("sangat mempengaruhi", 2.0),
    contains("banyak", 2.0),
    contains("cukup", 3.0),
    contains("sedikit", 4.0),
    contains("tidak", 4.0),
    contains("belum", 5.0),
];

fn aliases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Criterion {
    /// The five criteria of the location study: rent, sales volume, raw
    /// material availability, facilities and competition.
    pub fn reference_set() -> Vec<Criterion> {
        vec![
            Criterion {
                id: "C1".to_string(),
                name: "Rental cost".to_string(),
                polarity: Polarity::Cost,
                aliases: aliases(&["sewa", "rent", "harga sewa"]),
                scoring: Scoring::Magnitude {
                    units: RENT_UNITS,
                    steps: RENT_STEPS,
                    phrases: RENT_PHRASES,
                    // An unknown rent is penalized.
                    unknown: 1.0,
                },
            },
            Criterion {
                id: "C2".to_string(),
                name: "Sales volume".to_string(),
                polarity: Polarity::Benefit,
                aliases: aliases(&["penjualan", "jual", "omzet", "pendapatan", "sales", "revenue"]),
                scoring: Scoring::Magnitude {
                    units: SALES_UNITS,
                    steps: SALES_STEPS,
                    phrases: SALES_PHRASES,
                    unknown: 1.0,
                },
            },
            Criterion {
                id: "C3".to_string(),
                name: "Raw material availability".to_string(),
                polarity: Polarity::Benefit,
                aliases: aliases(&["bahan", "baku", "material", "supply"]),
                scoring: Scoring::Keywords {
                    rules: MATERIAL_RULES,
                    default: 3.0,
                },
            },
            Criterion {
                id: "C4".to_string(),
                name: "Facilities".to_string(),
                polarity: Polarity::Benefit,
                aliases: aliases(&["fasilitas", "facilit", "sarana"]),
                scoring: Scoring::Enumerated {
                    steps: FACILITY_STEPS,
                    none_markers: &["tidak ada", "none", "-", "nihil", "kosong"],
                    negations: &["tidak", "tanpa", "belum", "no "],
                    override_keywords: &["wifi", "wi-fi", "internet"],
                    override_score: 5.0,
                },
            },
            Criterion {
                id: "C5".to_string(),
                name: "Competition".to_string(),
                polarity: Polarity::Cost,
                aliases: aliases(&["persaingan", "saing", "kompetitor", "competit"]),
                scoring: Scoring::Keywords {
                    rules: COMPETITION_RULES,
                    // Competition is assumed present when nothing is said.
                    default: 2.0,
                },
            },
        ]
    }
}

// ********* Judgments **********

/// "`row` is `intensity` times as important as `column`" on the 1-9 scale.
/// The reciprocal entry is implied.
#[derive(PartialEq, Debug, Clone)]
pub struct Judgment {
    pub row: String,
    pub column: String,
    pub intensity: f64,
}

impl Judgment {
    pub fn new(row: &str, column: &str, intensity: f64) -> Judgment {
        Judgment {
            row: row.to_string(),
            column: column.to_string(),
            intensity,
        }
    }
}

/// The criteria influencing `target`, weighted by their own judgments.
/// The supermatrix column of `target` is built from these weights instead
/// of the outer priorities.
#[derive(PartialEq, Debug, Clone)]
pub struct InnerDependence {
    pub target: String,
    pub sources: Vec<String>,
    pub judgments: Vec<Judgment>,
}

/// The criteria network: direct judgments among all criteria and the inner
/// dependencies between some of them.
#[derive(PartialEq, Debug, Clone)]
pub struct NetworkConfig {
    pub criteria: Vec<String>,
    pub outer: Vec<Judgment>,
    pub inner: Vec<InnerDependence>,
    /// Maximum power the supermatrix is raised to.
    pub limit_power: u32,
    /// Successive powers closer than this are considered converged.
    pub tolerance: f64,
}

impl NetworkConfig {
    pub const DEFAULT_LIMIT_POWER: u32 = 100;
    pub const DEFAULT_TOLERANCE: f64 = 1e-12;

    /// The judgments of the location study. Sales volume dominates, followed
    /// by rent and facilities; sales volume itself depends on rent,
    /// facilities and competition.
    pub fn reference() -> NetworkConfig {
        let ids = ["C1", "C2", "C3", "C4", "C5"];
        NetworkConfig {
            criteria: ids.iter().map(|s| s.to_string()).collect(),
            outer: vec![
                Judgment::new("C2", "C1", 2.0),
                Judgment::new("C2", "C3", 9.0),
                Judgment::new("C2", "C4", 3.0),
                Judgment::new("C2", "C5", 4.0),
                Judgment::new("C1", "C3", 7.0),
                Judgment::new("C1", "C4", 2.0),
                Judgment::new("C1", "C5", 3.0),
                Judgment::new("C4", "C3", 5.0),
                Judgment::new("C4", "C5", 2.0),
                Judgment::new("C5", "C3", 4.0),
            ],
            inner: vec![InnerDependence {
                target: "C2".to_string(),
                sources: vec!["C1".to_string(), "C4".to_string(), "C5".to_string()],
                judgments: vec![
                    Judgment::new("C5", "C1", 3.0),
                    Judgment::new("C5", "C4", 2.0),
                    Judgment::new("C4", "C1", 2.0),
                ],
            }],
            limit_power: NetworkConfig::DEFAULT_LIMIT_POWER,
            tolerance: NetworkConfig::DEFAULT_TOLERANCE,
        }
    }
}

// ********* Configuration **********

#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisSettings {
    pub criteria: Vec<Criterion>,
    pub network: NetworkConfig,
    /// Matrices with a consistency ratio below this are reported as valid.
    pub consistency_threshold: f64,
}

impl AnalysisSettings {
    pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.1;
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            criteria: Criterion::reference_set(),
            network: NetworkConfig::reference(),
            consistency_threshold: AnalysisSettings::DEFAULT_CONSISTENCY_THRESHOLD,
        }
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ConsistencyStatus {
    Valid,
    LowConsistency,
}

impl Display for ConsistencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyStatus::Valid => write!(f, "Valid"),
            ConsistencyStatus::LowConsistency => write!(f, "Low consistency"),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ConsistencyReport {
    pub ci: f64,
    pub cr: f64,
    pub status: ConsistencyStatus,
}

impl ConsistencyReport {
    pub fn new(ci: f64, cr: f64, threshold: f64) -> ConsistencyReport {
        let status = if cr < threshold {
            ConsistencyStatus::Valid
        } else {
            ConsistencyStatus::LowConsistency
        };
        ConsistencyReport { ci, cr, status }
    }
}

/// The global weights of the criteria, in network order.
#[derive(PartialEq, Debug, Clone)]
pub struct CriteriaWeights {
    pub weights: Vec<(String, f64)>,
    /// Consistency of the outer judgments.
    pub report: ConsistencyReport,
    /// Consistency of each inner dependence, by target criterion.
    pub inner_reports: Vec<(String, ConsistencyReport)>,
}

impl CriteriaWeights {
    pub fn get(&self, id: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, w)| *w)
    }
}

/// One row of the input, with its scores in criteria order.
#[derive(PartialEq, Debug, Clone)]
pub struct Alternative {
    pub label: String,
    pub scores: Vec<(String, f64)>,
    pub global_score: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankedAlternative {
    pub label: String,
    pub score: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisResult {
    /// Best alternative first.
    pub ranking: Vec<RankedAlternative>,
    /// In input order.
    pub alternatives: Vec<Alternative>,
    pub criteria_weights: Vec<(String, f64)>,
    pub consistency: ConsistencyReport,
    /// Consistency of the alternative comparison matrix of each criterion.
    pub criterion_consistency: Vec<(String, ConsistencyReport)>,
    pub summary: String,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RevenueProjection {
    pub label: String,
    pub raw: String,
    pub monthly: f64,
    pub yearly: f64,
}

/// Errors that prevent an analysis from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnalysisErrors {
    /// Some criteria have no matching column in the header.
    IncompleteCriteria { missing: Vec<String> },
    EmptyTable,
    InvalidJudgment(String),
    MissingRevenueColumn,
}

impl Error for AnalysisErrors {}

impl Display for AnalysisErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisErrors::IncompleteCriteria { missing } => write!(
                f,
                "incomplete criteria: no column found for {}",
                missing.join(", ")
            ),
            AnalysisErrors::EmptyTable => write!(f, "the table has no header"),
            AnalysisErrors::InvalidJudgment(msg) => write!(f, "invalid judgment: {}", msg),
            AnalysisErrors::MissingRevenueColumn => {
                write!(f, "no sales or revenue column found")
            }
        }
    }
}
