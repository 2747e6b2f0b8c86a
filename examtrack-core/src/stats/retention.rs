use crate::models::Review;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

use super::percent;

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Retention {
    /// Percent correct, 0 for an empty history.
    pub overall: u32,
    pub total_reviews: u32,
    pub correct_reviews: u32,
}

pub fn retention(reviews: &[Review]) -> Retention {
    let total = reviews.len() as u32;
    let correct = reviews.iter().filter(|r| r.correct).count() as u32;
    Retention {
        overall: percent(correct, total),
        total_reviews: total,
        correct_reviews: correct,
    }
}

/// Same ratio, grouped by an arbitrary key. Reviews for which `key` returns
/// `None` (e.g. an orphaned card id) are skipped.
pub fn retention_by<K, F>(reviews: &[Review], mut key: F) -> HashMap<K, Retention>
where
    K: Eq + Hash,
    F: FnMut(&Review) -> Option<K>,
{
    let mut counts: HashMap<K, (u32, u32)> = HashMap::new();
    for r in reviews {
        if let Some(k) = key(r) {
            let entry = counts.entry(k).or_default();
            entry.0 += 1;
            if r.correct {
                entry.1 += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(k, (total, correct))| {
            (
                k,
                Retention {
                    overall: percent(correct, total),
                    total_reviews: total,
                    correct_reviews: correct,
                },
            )
        })
        .collect()
}
