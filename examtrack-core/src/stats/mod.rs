pub mod achievements;
pub mod cards;
pub mod difficulty;
pub mod papers;
pub mod recommend;
pub mod retention;
pub mod sessions;
pub mod streak;
pub mod time;
pub mod trends;

pub use achievements::{
    evaluate_achievements, AchievementKind, AchievementReport, Badge, BadgeLevel, Milestone,
};
pub use cards::{classify_cards, CardBuckets, CardCounts};
pub use difficulty::{difficulty_stats, DifficultyStats};
pub use papers::{paper_breakdown, PaperStats};
pub use recommend::{recommend, Priority, Recommendation, RecommendationKind};
pub use retention::{retention, retention_by, Retention};
pub use sessions::{summarize_sessions, SessionSummary};
pub use streak::{resolve_streak, streak_from_dates, StreakSource, StreakStats};
pub use time::{time_stats, TimeStats};
pub use trends::{analyze_trends, Trend, TrendReport, VolumeTrend, WeeklyBucket};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Card, Review, StudySession, TopicProgress};

/// Everything one statistics run needs. The caller fetches the collections
/// and supplies `now`; the engine touches no clock and no storage.
pub struct StatsRequest<'a> {
    pub cards: &'a [Card],
    /// Most-recent-first.
    pub reviews: &'a [Review],
    /// Most-recent-first.
    pub sessions: &'a [StudySession],
    pub streak: &'a StreakSource,
    pub progress: &'a [TopicProgress],
    pub papers: &'a [String],
    pub now: DateTime<Utc>,
}

/// The composite dashboard object. Recomputed fresh on every call and
/// serialized as-is by the callers.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub cards: CardCounts,
    pub retention: Retention,
    pub sessions: SessionSummary,
    pub time: TimeStats,
    pub papers: BTreeMap<String, PaperStats>,
    pub difficulty: DifficultyStats,
    pub trends: TrendReport,
    pub streak: StreakStats,
    pub achievements: AchievementReport,
    pub recommendations: Vec<Recommendation>,
}

pub fn compute_statistics(req: &StatsRequest) -> Statistics {
    let today = req.now.date_naive();

    let buckets = cards::classify_cards(req.cards, today);
    let retention = retention::retention(req.reviews);
    let sessions = sessions::summarize_sessions(req.sessions, req.now);
    let time = time::time_stats(req.reviews, req.sessions);
    let papers = papers::paper_breakdown(req.cards, req.reviews, req.papers);
    let difficulty = difficulty::difficulty_stats(req.reviews);
    let trends = trends::analyze_trends(req.reviews, req.sessions);
    let streak = streak::resolve_streak(req.streak, today);
    let achievements = achievements::evaluate_achievements(
        req.cards.len() as u32,
        req.sessions,
        &streak,
        &retention,
    );
    let recommendations = recommend::recommend(req.progress, req.now);

    Statistics {
        cards: buckets.counts(),
        retention,
        sessions,
        time,
        papers,
        difficulty,
        trends,
        streak,
        achievements,
        recommendations,
    }
}

/// part/whole as a rounded integer percent; 0 for an empty whole.
pub(crate) fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (part as f64 * 100.0 / whole as f64).round() as u32
    }
}

/// sum/count rounded to the nearest integer; 0 for an empty count.
pub(crate) fn round_div(sum: u32, count: u32) -> u32 {
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).round() as u32
    }
}
