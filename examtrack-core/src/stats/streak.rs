use crate::models::StreakSeed;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Where the streak numbers come from. Upstream has both shapes: a
/// database-side routine that hands over finished numbers, and raw session
/// dates that get walked locally. Which one is authoritative is the
/// caller's call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreakSource {
    Seed(StreakSeed),
    /// Distinct study days, most-recent-first.
    Dates(Vec<NaiveDate>),
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub current: u32,
    pub longest: u32,
    pub total_days: u32,
}

pub fn resolve_streak(source: &StreakSource, today: NaiveDate) -> StreakStats {
    match source {
        StreakSource::Seed(seed) => StreakStats {
            current: seed.current,
            longest: seed.longest,
            total_days: seed.total_days,
        },
        StreakSource::Dates(dates) => streak_from_dates(dates, today),
    }
}

/// Walk backward one day at a time until the first gap. A streak survives
/// until the day ends, so a newest entry of yesterday still anchors the
/// walk; anything older means the streak is already broken.
pub fn streak_from_dates(dates: &[NaiveDate], today: NaiveDate) -> StreakStats {
    let Some(&newest) = dates.first() else {
        return StreakStats::default();
    };

    let mut current = 0u32;
    if newest == today || newest == today - Duration::days(1) {
        let mut cursor = newest;
        for &day in dates {
            if day == cursor {
                current += 1;
                cursor -= Duration::days(1);
            } else {
                break;
            }
        }
    }

    StreakStats {
        current,
        longest: longest_run(dates),
        total_days: dates.len() as u32,
    }
}

fn longest_run(dates: &[NaiveDate]) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in dates {
        run = match prev {
            Some(p) if p - day == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}
