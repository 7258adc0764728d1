use log::debug;

use crate::config::*;
use crate::matrix::Matrix;

/// Saaty intensities for score gaps of 0, 1, 2, 3 and 4 or more.
const INTENSITIES: [f64; 5] = [1.0, 3.0, 5.0, 7.0, 9.0];

/// Random consistency index of Saaty, for matrices of size 1 to 15.
const RANDOM_INDEX: [f64; 15] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// The random index for a matrix of size n. Sizes above 15 use the value
/// for 15.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n => RANDOM_INDEX[n.min(RANDOM_INDEX.len()) - 1],
    }
}

/// The intensity of preference for a score gap. The gap is rounded to the
/// nearest step and clamped to 9.
pub fn intensity(gap: f64) -> f64 {
    let step = gap.abs().round() as usize;
    INTENSITIES[step.min(INTENSITIES.len() - 1)]
}

/// Builds the reciprocal comparison matrix of a list of scores: entry (i, j)
/// says how strongly item i is preferred to item j.
pub fn build_comparison_matrix(values: &[f64]) -> Matrix {
    let n = values.len();
    let mut m = Matrix::filled(n, 1.0);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let diff = values[i] - values[j];
            let s = intensity(diff);
            let entry = if diff > 0.0 {
                s
            } else if diff < 0.0 {
                1.0 / s
            } else {
                1.0
            };
            m.set(i, j, entry);
        }
    }
    m
}

/// Builds the reciprocal matrix over `ids` from a list of judgments.
/// Pairs without a judgment are of equal importance.
pub fn judgment_matrix(ids: &[String], judgments: &[Judgment]) -> Result<Matrix, AnalysisErrors> {
    let position = |id: &str| {
        ids.iter().position(|x| x == id).ok_or_else(|| {
            AnalysisErrors::InvalidJudgment(format!("unknown criterion {} in judgment", id))
        })
    };
    let mut m = Matrix::filled(ids.len(), 1.0);
    for j in judgments.iter() {
        let row = position(&j.row)?;
        let col = position(&j.column)?;
        if row == col {
            return Err(AnalysisErrors::InvalidJudgment(format!(
                "{} compared to itself",
                j.row
            )));
        }
        if !(j.intensity.is_finite() && j.intensity > 0.0) {
            return Err(AnalysisErrors::InvalidJudgment(format!(
                "intensity {} for {} over {} is not positive",
                j.intensity, j.row, j.column
            )));
        }
        m.set(row, col, j.intensity);
        m.set(col, row, 1.0 / j.intensity);
    }
    Ok(m)
}

/// The priority vector of a comparison matrix and its consistency.
#[derive(PartialEq, Debug, Clone)]
pub struct Priorities {
    /// Non-negative, sums to 1.
    pub weights: Vec<f64>,
    pub lambda_max: f64,
    pub ci: f64,
    pub cr: f64,
}

/// Approximates the principal eigenvector of a comparison matrix by
/// averaging its normalized columns, and estimates the consistency of the
/// judgments.
///
/// Columns that sum to zero are treated as uniform. The consistency ratio is
/// only a diagnostic: inconsistent matrices are solved all the same.
pub fn solve(m: &Matrix) -> Priorities {
    let n = m.size();
    if n == 0 {
        return Priorities {
            weights: vec![],
            lambda_max: 0.0,
            ci: 0.0,
            cr: 0.0,
        };
    }
    let col_sums = m.column_sums();
    let mut weights: Vec<f64> = vec![0.0; n];
    for (j, col_sum) in col_sums.iter().enumerate() {
        for (i, w) in weights.iter_mut().enumerate() {
            let normalized = if *col_sum > 0.0 && col_sum.is_finite() {
                m.get(i, j) / col_sum
            } else {
                1.0 / n as f64
            };
            *w += normalized / n as f64;
        }
    }
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.iter_mut().for_each(|w| *w /= total);
    }

    let lambda_max: f64 = col_sums
        .iter()
        .zip(weights.iter())
        .map(|(s, w)| s * w)
        .sum();
    let ci = if n > 1 {
        (lambda_max - n as f64) / (n as f64 - 1.0)
    } else {
        0.0
    };
    let ri = random_index(n);
    let cr = if ri > 0.0 { ci / ri } else { 0.0 };
    debug!(
        "solve: n: {} weights: {:?} lambda_max: {} ci: {} cr: {}",
        n, weights, lambda_max, ci, cr
    );
    Priorities {
        weights,
        lambda_max,
        ci,
        cr,
    }
}
