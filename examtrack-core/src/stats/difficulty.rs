use crate::models::Review;
use serde::Serialize;
use std::collections::BTreeMap;

/// Below this many rated reviews the correlation is reported as 0 rather
/// than computed from noise.
pub const MIN_CORRELATION_SAMPLES: usize = 5;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyStats {
    /// One decimal; 0.0 when nothing was rated.
    pub average_difficulty: f64,
    /// Counts per rating, all keys 1..=5 always present.
    pub distribution: BTreeMap<u8, u32>,
    /// Pearson r between rating and correctness, two decimals, in [-1, 1].
    pub correlation_accuracy: f64,
}

impl Default for DifficultyStats {
    fn default() -> Self {
        Self {
            average_difficulty: 0.0,
            distribution: empty_distribution(),
            correlation_accuracy: 0.0,
        }
    }
}

fn empty_distribution() -> BTreeMap<u8, u32> {
    (1..=5).map(|rating| (rating, 0)).collect()
}

pub fn difficulty_stats(reviews: &[Review]) -> DifficultyStats {
    let rated: Vec<(u8, bool)> = reviews
        .iter()
        .filter_map(|r| {
            r.difficulty
                .filter(|d| (1..=5).contains(d))
                .map(|d| (d, r.correct))
        })
        .collect();

    let mut distribution = empty_distribution();
    for (rating, _) in &rated {
        if let Some(count) = distribution.get_mut(rating) {
            *count += 1;
        }
    }

    let average_difficulty = if rated.is_empty() {
        0.0
    } else {
        let sum: u32 = rated.iter().map(|(d, _)| u32::from(*d)).sum();
        round1(f64::from(sum) / rated.len() as f64)
    };

    DifficultyStats {
        average_difficulty,
        distribution,
        correlation_accuracy: correlation(&rated),
    }
}

/// Pearson correlation of rating against correct-as-0/1. Zero variance on
/// either axis yields 0, not NaN.
fn correlation(rated: &[(u8, bool)]) -> f64 {
    if rated.len() < MIN_CORRELATION_SAMPLES {
        return 0.0;
    }
    let n = rated.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (rating, correct) in rated {
        let x = f64::from(*rating);
        let y = if *correct { 1.0 } else { 0.0 };
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    let r = (n * sum_xy - sum_x * sum_y) / denominator;
    round2(r.clamp(-1.0, 1.0))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
