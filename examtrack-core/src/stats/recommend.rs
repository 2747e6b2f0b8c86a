use crate::models::TopicProgress;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const WEAK_ACCURACY: u32 = 60;
const STRONG_ACCURACY: u32 = 80;
const STALE_AFTER_DAYS: i64 = 7;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Improvement,
    Review,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub topic: String,
    pub message: String,
}

/// At most two suggestions: fix the weakest topic first, then refresh the
/// strong topic that has sat untouched the longest. A topic never practiced
/// counts as maximally stale.
pub fn recommend(progress: &[TopicProgress], now: DateTime<Utc>) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if let Some(weakest) = progress
        .iter()
        .filter(|p| p.accuracy < WEAK_ACCURACY)
        .min_by_key(|p| p.accuracy)
    {
        out.push(Recommendation {
            kind: RecommendationKind::Improvement,
            priority: Priority::High,
            topic: weakest.topic.clone(),
            message: format!(
                "Accuracy in {} is {}%. Schedule focused practice.",
                weakest.topic, weakest.accuracy
            ),
        });
    }

    let cutoff = now - Duration::days(STALE_AFTER_DAYS);
    if let Some(stale) = progress
        .iter()
        .filter(|p| {
            p.accuracy >= STRONG_ACCURACY
                && p.last_practiced.map_or(true, |t| t < cutoff)
        })
        .min_by_key(|p| p.last_practiced)
    {
        out.push(Recommendation {
            kind: RecommendationKind::Review,
            priority: Priority::Medium,
            topic: stale.topic.clone(),
            message: format!(
                "{} is strong but hasn't been practiced in over a week. A short refresher keeps it that way.",
                stale.topic
            ),
        });
    }

    out
}
