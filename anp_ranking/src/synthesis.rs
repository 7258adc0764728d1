use log::debug;

use crate::config::*;

/// The global score of every alternative: the sum over the criteria of the
/// local priority of the alternative times the weight of the criterion.
/// A criterion without a weight does not contribute.
pub fn global_scores(local_priorities: &[(String, Vec<f64>)], weights: &[(String, f64)]) -> Vec<f64> {
    let n = local_priorities
        .iter()
        .map(|(_, p)| p.len())
        .max()
        .unwrap_or(0);
    let mut scores = vec![0.0; n];
    for (cid, priorities) in local_priorities.iter() {
        let weight = weights
            .iter()
            .find(|(wid, _)| wid == cid)
            .map(|(_, w)| *w)
            .unwrap_or(0.0);
        debug!("global_scores: {} weight {} priorities {:?}", cid, weight, priorities);
        for (score, p) in scores.iter_mut().zip(priorities.iter()) {
            *score += p * weight;
        }
    }
    scores
}

/// Combines the local priorities of the alternatives with the criteria
/// weights and sorts the alternatives by decreasing score. Alternatives with
/// the same score keep their input order.
pub fn synthesize(
    local_priorities: &[(String, Vec<f64>)],
    weights: &[(String, f64)],
    labels: &[String],
) -> Vec<RankedAlternative> {
    let scores = global_scores(local_priorities, weights);
    let mut ranked: Vec<RankedAlternative> = labels
        .iter()
        .zip(scores.iter())
        .map(|(label, score)| RankedAlternative {
            label: label.clone(),
            score: *score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// A one line description of the outcome: the three best alternatives and
/// the consistency of the criteria judgments.
pub fn summary(ranking: &[RankedAlternative], report: &ConsistencyReport) -> String {
    let mut res = match ranking {
        [] => "No alternative to rank.".to_string(),
        [first, rest @ ..] => {
            let mut s = format!(
                "Best location is {} with score {:.3}.",
                first.label, first.score
            );
            match rest {
                [] => {}
                [second] => {
                    s.push_str(&format!(" Second is {} ({:.3}).", second.label, second.score));
                }
                [second, third, ..] => {
                    s.push_str(&format!(
                        " Second is {} ({:.3}), third is {} ({:.3}).",
                        second.label, second.score, third.label, third.score
                    ));
                }
            }
            s
        }
    };
    res.push_str(&format!(
        " CI={:.4}, CR={:.4} ({}).",
        report.ci, report.cr, report.status
    ));
    res
}
