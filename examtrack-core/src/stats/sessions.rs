use crate::models::StudySession;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{percent, round_div};

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total: u32,
    pub average_questions: u32,
    pub average_accuracy: u32,
    /// Seconds.
    pub average_duration: u32,
    /// Seconds.
    pub longest_session: u32,
    /// Seconds.
    pub total_time: u32,
    pub this_week: u32,
    pub this_month: u32,
}

pub fn summarize_sessions(sessions: &[StudySession], now: DateTime<Utc>) -> SessionSummary {
    if sessions.is_empty() {
        return SessionSummary::default();
    }

    let total = sessions.len() as u32;
    let questions: u32 = sessions.iter().map(|s| s.questions).sum();
    let correct: u32 = sessions.iter().map(|s| s.correct).sum();
    let total_time: u32 = sessions.iter().map(|s| s.duration_secs).sum();
    let longest = sessions.iter().map(|s| s.duration_secs).fold(0, u32::max);

    let week_ago = now - Duration::days(7);
    let month_ago = now - Duration::days(30);

    SessionSummary {
        total,
        average_questions: round_div(questions, total),
        average_accuracy: percent(correct, questions),
        average_duration: round_div(total_time, total),
        longest_session: longest,
        total_time,
        this_week: sessions.iter().filter(|s| s.completed_at >= week_ago).count() as u32,
        this_month: sessions.iter().filter(|s| s.completed_at >= month_ago).count() as u32,
    }
}
