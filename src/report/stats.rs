use crate::models::entry::Entry;
use std::collections::BTreeMap;

/// Number of entries per area.
pub fn count_by_area<T: AsRef<Entry>>(entries: &[T]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for e in entries {
        *counts.entry(e.as_ref().area.clone()).or_insert(0) += 1;
    }
    counts
}

/// Area with the most entries. Ties go to the alphabetically first area.
pub fn leader(counts: &BTreeMap<String, usize>) -> Option<(String, usize)> {
    counts
        .iter()
        // BTreeMap iterates by name; keep the first of equal counts
        .fold(None, |best: Option<(&String, usize)>, (area, &n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((area, n)),
        })
        .map(|(a, n)| (a.clone(), n))
}

/// One slice of a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub area: String,
    pub count: usize,
    pub percent: f64,
}

/// Counts turned into percentages of the total, largest first.
pub fn shares(counts: &BTreeMap<String, usize>) -> Vec<Share> {
    let total: usize = counts.values().sum();
    let mut out: Vec<Share> = counts
        .iter()
        .map(|(area, &count)| Share {
            area: area.clone(),
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}
