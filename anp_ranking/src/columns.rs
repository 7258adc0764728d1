use log::{debug, info};

use crate::config::*;

fn keywords(criterion: &Criterion) -> Vec<String> {
    let mut res = vec![criterion.id.to_lowercase()];
    res.extend(criterion.aliases.iter().map(|a| a.to_lowercase()));
    res
}

/// Finds the column of each criterion: the first header that contains the
/// code of the criterion or one of its aliases, ignoring case.
///
/// The first column holds the labels of the alternatives and is never
/// matched. A column goes to the first criterion that matches it: later
/// criteria only look at the columns still free.
pub fn detect_columns(headers: &[String], criteria: &[Criterion]) -> Vec<(String, Option<usize>)> {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let mut claimed = vec![false; lowered.len()];
    let mut res = Vec::with_capacity(criteria.len());
    for c in criteria {
        let kws = keywords(c);
        let column = lowered
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(idx, _)| !claimed[*idx])
            .find(|(_, h)| kws.iter().any(|k| h.contains(k.as_str())))
            .map(|(idx, _)| idx);
        if let Some(idx) = column {
            claimed[idx] = true;
        }
        debug!("detect_columns: {} {:?} -> {:?}", c.id, kws, column);
        res.push((c.id.clone(), column));
    }
    res
}

/// The column index of every criterion, in criteria order. Fails with the
/// list of criteria that have no column.
pub fn resolve_columns(headers: &[String], criteria: &[Criterion]) -> Result<Vec<usize>, AnalysisErrors> {
    let detected = detect_columns(headers, criteria);
    let missing: Vec<String> = detected
        .iter()
        .filter(|(_, col)| col.is_none())
        .map(|(id, _)| id.clone())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisErrors::IncompleteCriteria { missing });
    }
    let columns: Vec<usize> = detected.iter().filter_map(|(_, col)| *col).collect();
    for ((id, _), col) in detected.iter().zip(columns.iter()) {
        info!("Criterion {}: column {:?}", id, headers[*col]);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detects_indonesian_headers() {
        let h = headers(&[
            "Nama Usaha",
            "Harga Sewa",
            "Volume Penjualan",
            "Bahan Baku",
            "Fasilitas",
            "Tingkat Persaingan",
        ]);
        let cols = resolve_columns(&h, &Criterion::reference_set()).unwrap();
        assert_eq!(cols, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn detects_codes_in_any_order() {
        let h = headers(&["Lokasi", "c5", "C4", "Kriteria C3", "C2 (porsi)", "C1"]);
        let cols = resolve_columns(&h, &Criterion::reference_set()).unwrap();
        assert_eq!(cols, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn label_column_is_not_a_criterion() {
        let h = headers(&["Lokasi sewa", "Omzet"]);
        let detected = detect_columns(&h, &Criterion::reference_set());
        assert_eq!(detected[0], ("C1".to_string(), None));
        assert_eq!(detected[1], ("C2".to_string(), Some(1)));
    }

    #[test]
    fn selling_price_is_not_the_rent() {
        let h = headers(&[
            "Lokasi",
            "Harga Jual",
            "Harga Sewa",
            "Bahan",
            "Fasilitas",
            "Persaingan",
        ]);
        let cols = resolve_columns(&h, &Criterion::reference_set()).unwrap();
        assert_eq!(cols, vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn a_column_belongs_to_one_criterion() {
        let mut criteria = Criterion::reference_set();
        criteria[0].aliases = vec!["harga".to_string()];
        let h = headers(&["Lokasi", "Harga Jual", "Bahan", "Fasilitas", "Persaingan"]);
        let detected = detect_columns(&h, &criteria);
        assert_eq!(detected[0], ("C1".to_string(), Some(1)));
        assert_eq!(detected[1], ("C2".to_string(), None));
        assert_eq!(
            resolve_columns(&h, &criteria).unwrap_err(),
            AnalysisErrors::IncompleteCriteria {
                missing: vec!["C2".to_string()]
            }
        );
    }

    #[test]
    fn missing_criteria_are_named() {
        let h = headers(&["Nama", "Sewa", "Penjualan", "Bahan Baku", "Fasilitas"]);
        let err = resolve_columns(&h, &Criterion::reference_set()).unwrap_err();
        assert_eq!(
            err,
            AnalysisErrors::IncompleteCriteria {
                missing: vec!["C5".to_string()]
            }
        );
        assert!(err.to_string().contains("incomplete criteria"));
    }
}
