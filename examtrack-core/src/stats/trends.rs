use crate::models::{Review, StudySession};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

use super::percent;

/// Below this many reviews every trend label is `insufficient_data`.
pub const MIN_TREND_REVIEWS: usize = 10;
/// Volume is only compared once this many sessions exist.
pub const MIN_VOLUME_SESSIONS: usize = 7;
/// Weekly series is capped to this many most-recent buckets.
pub const MAX_WEEKLY_BUCKETS: usize = 12;

const ACCURACY_MARGIN_POINTS: f64 = 5.0;
const SPEED_MARGIN_SECS: f64 = 5.0;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    InsufficientData,
}

/// Volume deliberately has no `Declining`: a quiet stretch reads as stable,
/// not as regression.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    Increasing,
    Stable,
    InsufficientData,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    /// Sunday that starts the week.
    pub week_start: NaiveDate,
    pub sessions: u32,
    pub questions: u32,
    pub correct: u32,
    pub accuracy: u32,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub accuracy_trend: Trend,
    pub speed_trend: Trend,
    pub volume_trend: VolumeTrend,
    /// Ascending by week start, at most the latest 12 weeks.
    pub weekly_progress: Vec<WeeklyBucket>,
}

/// Both inputs must be ordered most-recent-first.
pub fn analyze_trends(reviews: &[Review], sessions: &[StudySession]) -> TrendReport {
    if reviews.len() < MIN_TREND_REVIEWS {
        return TrendReport {
            accuracy_trend: Trend::InsufficientData,
            speed_trend: Trend::InsufficientData,
            volume_trend: VolumeTrend::InsufficientData,
            weekly_progress: Vec::new(),
        };
    }

    // Most-recent-first, so the front half is the newer one.
    let mid = reviews.len() / 2;
    let newer = &reviews[..mid];
    let older = &reviews[mid..];

    let newer_accuracy = accuracy_pct(newer);
    let older_accuracy = accuracy_pct(older);
    let accuracy_trend = if newer_accuracy - older_accuracy > ACCURACY_MARGIN_POINTS {
        Trend::Improving
    } else if older_accuracy - newer_accuracy > ACCURACY_MARGIN_POINTS {
        Trend::Declining
    } else {
        Trend::Stable
    };

    let newer_time = mean_response_secs(newer);
    let older_time = mean_response_secs(older);
    let speed_trend = if older_time - newer_time > SPEED_MARGIN_SECS {
        Trend::Improving
    } else if newer_time - older_time > SPEED_MARGIN_SECS {
        Trend::Declining
    } else {
        Trend::Stable
    };

    let volume_trend = if sessions.len() >= MIN_VOLUME_SESSIONS {
        let recent: u32 = sessions.iter().take(3).map(|s| s.questions).sum();
        let oldest: u32 = sessions.iter().rev().take(3).map(|s| s.questions).sum();
        if recent > oldest {
            VolumeTrend::Increasing
        } else {
            VolumeTrend::Stable
        }
    } else {
        VolumeTrend::Stable
    };

    TrendReport {
        accuracy_trend,
        speed_trend,
        volume_trend,
        weekly_progress: weekly_progress(sessions),
    }
}

fn accuracy_pct(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let correct = reviews.iter().filter(|r| r.correct).count();
    correct as f64 * 100.0 / reviews.len() as f64
}

fn mean_response_secs(reviews: &[Review]) -> f64 {
    let mut sum = 0u32;
    let mut count = 0u32;
    for t in reviews.iter().filter_map(|r| r.time_taken).filter(|&t| t > 0) {
        sum += t;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        f64::from(sum) / f64::from(count)
    }
}

fn weekly_progress(sessions: &[StudySession]) -> Vec<WeeklyBucket> {
    let mut weeks: BTreeMap<NaiveDate, (u32, u32, u32)> = BTreeMap::new();
    for s in sessions {
        let start = s.completed_at.date_naive().week(Weekday::Sun).first_day();
        let entry = weeks.entry(start).or_default();
        entry.0 += 1;
        entry.1 += s.questions;
        entry.2 += s.correct;
    }

    // BTreeMap already iterates ascending by week start.
    let mut buckets: Vec<WeeklyBucket> = weeks
        .into_iter()
        .map(|(week_start, (count, questions, correct))| WeeklyBucket {
            week_start,
            sessions: count,
            questions,
            correct,
            accuracy: percent(correct, questions),
        })
        .collect();
    if buckets.len() > MAX_WEEKLY_BUCKETS {
        buckets.drain(..buckets.len() - MAX_WEEKLY_BUCKETS);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Review, StudySession};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn review_at(days_ago: i64, correct: bool) -> Review {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap() - Duration::days(days_ago);
        Review::new(Uuid::new_v4(), at, correct)
    }

    fn session_at(days_ago: i64, questions: u32) -> StudySession {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 18, 0, 0).unwrap() - Duration::days(days_ago);
        StudySession::new(at, questions, questions / 2, 600)
    }

    #[test]
    fn under_ten_reviews_is_insufficient() {
        let reviews: Vec<Review> = (0..9).map(|i| review_at(i, true)).collect();
        let report = analyze_trends(&reviews, &[]);
        assert_eq!(report.accuracy_trend, Trend::InsufficientData);
        assert_eq!(report.speed_trend, Trend::InsufficientData);
        assert_eq!(report.volume_trend, VolumeTrend::InsufficientData);
        assert!(report.weekly_progress.is_empty());
    }

    #[test]
    fn accuracy_improves_when_newer_half_is_better() {
        // Newest six: 5/6 correct. Oldest six: 3/6. Gap is 33 points.
        let mut reviews = Vec::new();
        for i in 0..6 {
            reviews.push(review_at(i, i != 0));
        }
        for i in 6..12 {
            reviews.push(review_at(i, i % 2 == 0));
        }
        let report = analyze_trends(&reviews, &[]);
        assert_eq!(report.accuracy_trend, Trend::Improving);
    }

    #[test]
    fn small_accuracy_movement_is_stable() {
        // 5/10 vs 5/10: identical halves.
        let reviews: Vec<Review> = (0..20).map(|i| review_at(i, i % 2 == 0)).collect();
        let report = analyze_trends(&reviews, &[]);
        assert_eq!(report.accuracy_trend, Trend::Stable);
    }

    #[test]
    fn faster_newer_half_improves_speed() {
        let mut reviews = Vec::new();
        for i in 0..5 {
            let mut r = review_at(i, true);
            r.time_taken = Some(10);
            reviews.push(r);
        }
        for i in 5..10 {
            let mut r = review_at(i, true);
            r.time_taken = Some(20);
            reviews.push(r);
        }
        let report = analyze_trends(&reviews, &[]);
        assert_eq!(report.speed_trend, Trend::Improving);
    }

    #[test]
    fn volume_trend_needs_seven_sessions() {
        let reviews: Vec<Review> = (0..12).map(|i| review_at(i, true)).collect();
        let sessions: Vec<StudySession> = (0..6).map(|i| session_at(i, 10)).collect();
        let report = analyze_trends(&reviews, &sessions);
        assert_eq!(report.volume_trend, VolumeTrend::Stable);
    }

    #[test]
    fn growing_volume_is_increasing() {
        let reviews: Vec<Review> = (0..12).map(|i| review_at(i, true)).collect();
        // Newest three sessions carry 30 questions each, oldest three 5 each.
        let sessions: Vec<StudySession> = (0..8)
            .map(|i| session_at(i, if i < 3 { 30 } else { 5 }))
            .collect();
        let report = analyze_trends(&reviews, &sessions);
        assert_eq!(report.volume_trend, VolumeTrend::Increasing);
    }

    #[test]
    fn shrinking_volume_stays_stable() {
        // There is intentionally no Declining volume label; a drop in volume
        // must read as Stable.
        let reviews: Vec<Review> = (0..12).map(|i| review_at(i, true)).collect();
        let sessions: Vec<StudySession> = (0..8)
            .map(|i| session_at(i, if i < 3 { 2 } else { 40 }))
            .collect();
        let report = analyze_trends(&reviews, &sessions);
        assert_eq!(report.volume_trend, VolumeTrend::Stable);
    }

    #[test]
    fn weekly_buckets_align_to_sunday_and_cap_at_twelve() {
        let reviews: Vec<Review> = (0..12).map(|i| review_at(i, true)).collect();
        // 16 weekly sessions: one per week going back.
        let sessions: Vec<StudySession> = (0..16).map(|i| session_at(i * 7, 10)).collect();
        let report = analyze_trends(&reviews, &sessions);
        assert_eq!(report.weekly_progress.len(), MAX_WEEKLY_BUCKETS);
        for bucket in &report.weekly_progress {
            assert_eq!(bucket.week_start.week(Weekday::Sun).first_day(), bucket.week_start);
        }
        // Ascending order, most recent weeks kept.
        let starts: Vec<_> = report.weekly_progress.iter().map(|b| b.week_start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn weekly_accuracy_guards_zero_questions() {
        let reviews: Vec<Review> = (0..12).map(|i| review_at(i, true)).collect();
        let sessions = vec![StudySession::new(
            Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            0,
            0,
            300,
        )];
        let report = analyze_trends(&reviews, &sessions);
        assert_eq!(report.weekly_progress.len(), 1);
        assert_eq!(report.weekly_progress[0].accuracy, 0);
    }
}
