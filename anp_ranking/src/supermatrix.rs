use log::{debug, info, warn};
use std::collections::HashSet;

use crate::config::*;
use crate::matrix::Matrix;
use crate::pairwise::{judgment_matrix, solve};

/// A column stochastic matrix over the criteria of a network, with the
/// priorities the columns were built from.
#[derive(PartialEq, Debug, Clone)]
pub struct Supermatrix {
    pub ids: Vec<String>,
    pub matrix: Matrix,
    pub outer_report: ConsistencyReport,
    pub inner_reports: Vec<(String, ConsistencyReport)>,
}

fn check_ids(ids: &[String]) -> Result<(), AnalysisErrors> {
    if ids.is_empty() {
        return Err(AnalysisErrors::InvalidJudgment(
            "the network has no criteria".to_string(),
        ));
    }
    let mut seen: HashSet<&String> = HashSet::new();
    for id in ids.iter() {
        if !seen.insert(id) {
            return Err(AnalysisErrors::InvalidJudgment(format!(
                "criterion {} appears twice in the network",
                id
            )));
        }
    }
    Ok(())
}

/// Assembles the supermatrix of a network.
///
/// Column j holds the importance of every criterion given criterion j. It is
/// the outer priority vector, except for the targets of inner dependencies:
/// there only the sources carry weight, according to their own judgments.
pub fn build_supermatrix(
    network: &NetworkConfig,
    threshold: f64,
) -> Result<Supermatrix, AnalysisErrors> {
    let ids = &network.criteria;
    check_ids(ids)?;
    let n = ids.len();

    let outer = solve(&judgment_matrix(ids, &network.outer)?);
    let outer_report = ConsistencyReport::new(outer.ci, outer.cr, threshold);
    info!(
        "Outer priorities: {:?} (CI={:.4}, CR={:.4})",
        outer.weights, outer.ci, outer.cr
    );

    let mut matrix = Matrix::filled(n, 0.0);
    for j in 0..n {
        for (i, w) in outer.weights.iter().enumerate() {
            matrix.set(i, j, *w);
        }
    }

    let mut inner_reports: Vec<(String, ConsistencyReport)> = Vec::new();
    let mut targets: HashSet<&String> = HashSet::new();
    for dep in network.inner.iter() {
        let target = ids.iter().position(|x| *x == dep.target).ok_or_else(|| {
            AnalysisErrors::InvalidJudgment(format!(
                "unknown inner dependence target {}",
                dep.target
            ))
        })?;
        if !targets.insert(&dep.target) {
            return Err(AnalysisErrors::InvalidJudgment(format!(
                "two inner dependencies for {}",
                dep.target
            )));
        }
        if dep.sources.is_empty() {
            return Err(AnalysisErrors::InvalidJudgment(format!(
                "inner dependence of {} has no sources",
                dep.target
            )));
        }
        if dep.sources.contains(&dep.target) {
            return Err(AnalysisErrors::InvalidJudgment(format!(
                "{} cannot depend on itself",
                dep.target
            )));
        }
        check_ids(&dep.sources)?;

        let inner = solve(&judgment_matrix(&dep.sources, &dep.judgments)?);
        let report = ConsistencyReport::new(inner.ci, inner.cr, threshold);
        if report.status == ConsistencyStatus::LowConsistency {
            warn!(
                "Inner dependence of {}: low consistency (CR={:.4})",
                dep.target, inner.cr
            );
        }
        debug!(
            "build_supermatrix: inner dependence of {}: {:?} -> {:?}",
            dep.target, dep.sources, inner.weights
        );

        for i in 0..n {
            matrix.set(i, target, 0.0);
        }
        for (source, w) in dep.sources.iter().zip(inner.weights.iter()) {
            let i = ids.iter().position(|x| x == source).ok_or_else(|| {
                AnalysisErrors::InvalidJudgment(format!(
                    "unknown source {} for {}",
                    source, dep.target
                ))
            })?;
            matrix.set(i, target, *w);
        }
        inner_reports.push((dep.target.clone(), report));
    }

    Ok(Supermatrix {
        ids: ids.clone(),
        matrix,
        outer_report,
        inner_reports,
    })
}

/// Raises a column stochastic matrix to successive powers until they stop
/// changing (or `max_power` is reached) and returns the averaged columns of
/// the last power, normalized to sum to 1.
///
/// For an ergodic chain all the columns of the limit are equal, and this is
/// its stationary distribution. The averaging keeps periodic chains from
/// depending on the parity of the last power.
pub fn limit_vector(s: &Matrix, max_power: u32, tolerance: f64) -> Vec<f64> {
    let n = s.size();
    let mut power = s.clone();
    let mut exponent: u32 = 1;
    let mut converged = false;
    while exponent < max_power {
        let next = power.multiply(s);
        exponent += 1;
        let delta = next.max_abs_diff(&power);
        power = next;
        if delta < tolerance {
            converged = true;
            break;
        }
    }
    if converged {
        debug!("limit_vector: converged at power {}", exponent);
    } else {
        warn!(
            "limit_vector: no convergence after power {}, averaging the columns",
            exponent
        );
    }

    let mut res: Vec<f64> = (0..n)
        .map(|i| (0..n).map(|j| power.get(i, j)).sum::<f64>() / n as f64)
        .collect();
    let total: f64 = res.iter().sum();
    if total > 0.0 {
        res.iter_mut().for_each(|x| *x /= total);
    }
    res
}

/// The global weights of the criteria of a network, read from the limit of
/// its supermatrix. The reported consistency is the one of the outer
/// judgments.
pub fn criteria_weights(
    network: &NetworkConfig,
    threshold: f64,
) -> Result<CriteriaWeights, AnalysisErrors> {
    let sm = build_supermatrix(network, threshold)?;
    let limit = limit_vector(&sm.matrix, network.limit_power, network.tolerance);
    let weights: Vec<(String, f64)> = sm.ids.iter().cloned().zip(limit).collect();
    info!("Criteria weights: {:?}", weights);
    Ok(CriteriaWeights {
        weights,
        report: sm.outer_report,
        inner_reports: sm.inner_reports,
    })
}
