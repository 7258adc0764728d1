use log::debug;

use crate::config::*;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

/// Converts a raw cell into a score between 1 and 5 for the given criterion.
///
/// A cell that is already a number between 1 and 5 is taken as is. Otherwise
/// the scoring rules of the criterion apply. This never fails: unreadable
/// content gets the fallback score of the criterion.
pub fn normalize(criterion: &Criterion, raw: &Cell) -> f64 {
    let text = raw.as_text();
    let score = score_text(&criterion.scoring, &text);
    debug!("normalize: {} {:?} -> {}", criterion.id, raw, score);
    score
}

pub fn score_text(scoring: &Scoring, text: &str) -> f64 {
    if let Some(score) = pre_scored(text) {
        return score;
    }
    let lowered = text.trim().to_lowercase();
    match scoring {
        Scoring::Magnitude {
            units,
            steps,
            phrases,
            unknown,
        } => match magnitude(&lowered, units) {
            Some(m) if m > 0.0 => steps.score(m),
            _ => first_match(phrases, &lowered).unwrap_or(*unknown),
        },
        Scoring::Keywords { rules, default } => first_match(rules, &lowered).unwrap_or(*default),
        Scoring::Enumerated {
            steps,
            none_markers,
            negations,
            override_keywords,
            override_score,
        } => {
            let items = present_items(&lowered, none_markers, negations);
            if items
                .iter()
                .any(|item| override_keywords.iter().any(|k| item.contains(k)))
            {
                *override_score
            } else {
                steps.score(items.len() as f64)
            }
        }
    }
}

fn pre_scored(text: &str) -> Option<f64> {
    let x = text.trim().replace(',', ".").parse::<f64>().ok()?;
    if (MIN_SCORE..=MAX_SCORE).contains(&x) {
        Some(x)
    } else {
        None
    }
}

fn first_match(rules: &[Rule], text: &str) -> Option<f64> {
    rules
        .iter()
        .find(|r| r.pattern.matches(text))
        .map(|r| r.score)
}

/// The amount described by a text: the average of the numbers it contains,
/// scaled by the first unit marker found. None if there are no digits.
pub fn magnitude(text: &str, units: &[Unit]) -> Option<f64> {
    let numbers = extract_numbers(text);
    if numbers.is_empty() {
        return None;
    }
    let average = numbers.iter().sum::<f64>() / numbers.len() as f64;
    let factor = units
        .iter()
        .find(|u| text.contains(u.marker))
        .map(|u| u.factor)
        .unwrap_or(1.0);
    Some(average * factor)
}

/// All the numbers written in a text, with "." and "," read either as
/// thousands separators or as decimal marks.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    let chars: Vec<char> = text.chars().collect();
    let mut res: Vec<f64> = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        if !chars[idx].is_ascii_digit() {
            idx += 1;
            continue;
        }
        let start = idx;
        while idx < chars.len() {
            let c = chars[idx];
            let separator_inside = (c == '.' || c == ',')
                && chars.get(idx + 1).map_or(false, |n| n.is_ascii_digit());
            if c.is_ascii_digit() || separator_inside {
                idx += 1;
            } else {
                break;
            }
        }
        let token: String = chars[start..idx].iter().collect();
        if let Some(x) = parse_number(&token) {
            res.push(x);
        }
    }
    res
}

fn parse_number(token: &str) -> Option<f64> {
    let is_sep = |c: char| c == '.' || c == ',';
    let num_seps = token.chars().filter(|c| is_sep(*c)).count();
    let has_dot = token.contains('.');
    let has_comma = token.contains(',');

    let cleaned: String = if num_seps == 0 {
        token.to_string()
    } else if has_dot && has_comma {
        // The last separator is the decimal mark, the other one groups thousands.
        let decimal_pos = token.rfind(is_sep)?;
        token
            .char_indices()
            .filter_map(|(pos, c)| match c {
                _ if pos == decimal_pos => Some('.'),
                '.' | ',' => None,
                _ => Some(c),
            })
            .collect()
    } else if num_seps > 1 {
        token.chars().filter(|c| !is_sep(*c)).collect()
    } else {
        let pos = token.find(is_sep)?;
        let digits_after = token.len() - pos - 1;
        if digits_after == 3 {
            token.chars().filter(|c| !is_sep(*c)).collect()
        } else {
            token.replace(',', ".")
        }
    };
    cleaned.parse::<f64>().ok()
}

/// The comma-separated items of a list that are actually there: empty
/// items, none markers and negated items are dropped.
fn present_items<'a>(text: &'a str, none_markers: &[&str], negations: &[&str]) -> Vec<&'a str> {
    text.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && !none_markers.contains(s))
        .filter(|s| !negations.iter().any(|n| s.starts_with(n)))
        .collect()
}
