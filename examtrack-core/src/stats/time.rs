use crate::models::{Review, StudySession};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use super::round_div;

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeStats {
    /// Seconds; only reviews with a measured time count.
    pub average_response_time: u32,
    pub fastest_response: u32,
    pub slowest_response: u32,
    /// Seconds across all sessions.
    pub total_study_time: u32,
    /// Total study time over distinct study days.
    pub daily_average: u32,
}

pub fn time_stats(reviews: &[Review], sessions: &[StudySession]) -> TimeStats {
    let mut sum = 0u32;
    let mut count = 0u32;
    let mut fastest = 0u32;
    let mut slowest = 0u32;
    // Zero or missing time_taken means the answer wasn't timed, not that it
    // was instant.
    for t in reviews.iter().filter_map(|r| r.time_taken).filter(|&t| t > 0) {
        sum += t;
        count += 1;
        if fastest == 0 || t < fastest {
            fastest = t;
        }
        if t > slowest {
            slowest = t;
        }
    }

    let total_study_time: u32 = sessions.iter().map(|s| s.duration_secs).sum();
    let study_days: BTreeSet<NaiveDate> =
        sessions.iter().map(|s| s.completed_at.date_naive()).collect();

    TimeStats {
        average_response_time: round_div(sum, count),
        fastest_response: fastest,
        slowest_response: slowest,
        total_study_time,
        daily_average: round_div(total_study_time, study_days.len() as u32),
    }
}
