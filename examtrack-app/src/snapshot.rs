use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use directories::ProjectDirs;
use examtrack_core::{
    compute_statistics, Card, Repository, Review, StatsRequest, Statistics, StreakSeed,
    StreakSource, StudySession, TopicProgress,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PAPERS: [&str; 3] = ["paper1", "paper2", "paper3"];

/// Everything the app persists, in one JSON file. Unknown or missing fields
/// fall back to empty so old snapshots keep loading.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub cards: Vec<Card>,
    pub reviews: Vec<Review>,
    pub sessions: Vec<StudySession>,
    /// Precomputed streak numbers; when absent the streak is walked from
    /// session dates instead.
    pub streak: Option<StreakSeed>,
    pub progress: Vec<TopicProgress>,
    pub papers: Vec<String>,
}

impl Snapshot {
    pub fn papers(&self) -> Vec<String> {
        if self.papers.is_empty() {
            DEFAULT_PAPERS.iter().map(|s| s.to_string()).collect()
        } else {
            self.papers.clone()
        }
    }
}

pub fn data_root() -> PathBuf {
    // org = "examtrack", app = "ExamTrack"
    if let Some(pd) = ProjectDirs::from("com", "examtrack", "ExamTrack") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn default_snapshot_file() -> PathBuf {
    data_root().join("examtrack.json")
}

/// A missing file is a fresh start; a corrupt one is logged and skipped.
/// Either way the caller gets a usable (possibly empty) snapshot.
pub fn load_or_default(path: &Path) -> Snapshot {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!("no snapshot at {}: {err}", path.display());
            return Snapshot::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(snap) => snap,
        Err(err) => {
            tracing::warn!("unreadable snapshot {}: {err}", path.display());
            Snapshot::default()
        }
    }
}

pub fn save(path: &Path, snap: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let s = serde_json::to_string_pretty(snap)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Run the engine over a snapshot. `period_days` trims reviews and sessions
/// to a trailing window; cards and topic progress always reflect the whole
/// collection.
pub fn build_statistics(
    snap: &Snapshot,
    now: DateTime<Utc>,
    period_days: Option<i64>,
    include_recommendations: bool,
) -> Statistics {
    let mut reviews = snap.reviews.clone();
    reviews.sort_by(|a, b| b.reviewed_at.cmp(&a.reviewed_at));
    let mut sessions = snap.sessions.clone();
    sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    if let Some(days) = period_days {
        let cutoff = now - Duration::days(days);
        reviews.retain(|r| r.reviewed_at >= cutoff);
        sessions.retain(|s| s.completed_at >= cutoff);
    }

    let streak = match snap.streak {
        Some(seed) => StreakSource::Seed(seed),
        None => StreakSource::Dates(session_dates(&sessions)),
    };
    let papers = snap.papers();

    let req = StatsRequest {
        cards: &snap.cards,
        reviews: &reviews,
        sessions: &sessions,
        streak: &streak,
        progress: &snap.progress,
        papers: &papers,
        now,
    };
    let mut stats = compute_statistics(&req);
    if !include_recommendations {
        stats.recommendations.clear();
    }
    stats
}

fn session_dates(sessions: &[StudySession]) -> Vec<NaiveDate> {
    // Sessions are newest-first, so duplicates of a day sit next to each other.
    let mut dates: Vec<NaiveDate> = sessions.iter().map(|s| s.completed_at.date_naive()).collect();
    dates.dedup();
    dates
}

pub async fn seed_repo(repo: &dyn Repository, snap: &Snapshot) -> Result<()> {
    for card in &snap.cards {
        repo.add_card(card).await?;
    }
    for review in &snap.reviews {
        repo.add_review(review).await?;
    }
    for session in &snap.sessions {
        repo.add_session(session).await?;
    }
    for progress in &snap.progress {
        repo.set_progress(progress).await?;
    }
    if let Some(seed) = snap.streak {
        repo.set_streak_seed(seed).await?;
    }
    Ok(())
}

/// Demo data: three papers, a spread of card maturities, a growing run of
/// sessions, and enough timed and rated reviews to light up every panel.
pub fn sample(now: DateTime<Utc>) -> Snapshot {
    let today = now.date_naive();

    let mut cards = Vec::new();
    for i in 0..24usize {
        let paper = DEFAULT_PAPERS[i % DEFAULT_PAPERS.len()];
        let mut card = Card::new(paper, today + Duration::days((i as i64 % 10) - 3));
        match i % 4 {
            0 => {}
            1 => {
                card.reps = 2;
                card.interval_days = 4;
                card.ef = 2.3;
            }
            2 => {
                card.reps = 4;
                card.interval_days = 21;
            }
            _ => {
                card.reps = 6;
                card.interval_days = 30;
                card.ef = 2.7;
            }
        }
        cards.push(card);
    }

    let mut reviews = Vec::new();
    for (i, card) in cards.iter().enumerate() {
        for j in 0..2usize {
            let days_ago = ((i * 2 + j) % 28) as i64;
            let at = now - Duration::days(days_ago) - Duration::hours(j as i64 + 1);
            let mut review = Review::new(card.id, at, (i + j) % 3 != 0);
            review.time_taken = Some(20 + ((i + j) as u32 * 7) % 40);
            review.difficulty = Some(1 + ((i + j) % 5) as u8);
            reviews.push(review);
        }
    }

    let mut sessions = Vec::new();
    for i in 0..12u32 {
        let questions = 10 + (11 - i) * 2;
        let correct = questions * 3 / 4;
        sessions.push(StudySession::new(
            now - Duration::days(i as i64 * 3),
            questions,
            correct,
            300 + questions * 20,
        ));
    }

    let progress = vec![
        TopicProgress {
            topic: "mechanics".into(),
            accuracy: 45,
            last_practiced: Some(now - Duration::days(2)),
        },
        TopicProgress {
            topic: "optics".into(),
            accuracy: 88,
            last_practiced: Some(now - Duration::days(12)),
        },
        TopicProgress {
            topic: "waves".into(),
            accuracy: 72,
            last_practiced: Some(now - Duration::days(1)),
        },
    ];

    Snapshot {
        cards,
        reviews,
        sessions,
        streak: None,
        progress,
        papers: DEFAULT_PAPERS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn correct_review(card: &Card, now: DateTime<Utc>, days_ago: i64) -> Review {
        Review::new(card.id, now - Duration::days(days_ago), true)
    }

    #[test]
    fn period_trims_activity_but_not_cards() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let today = now.date_naive();
        let cards = vec![Card::new("paper1", today), Card::new("paper1", today)];

        let mut reviews = Vec::new();
        for days_ago in [1, 2, 3, 4, 10, 11, 12, 13] {
            reviews.push(correct_review(&cards[0], now, days_ago));
        }
        let sessions = vec![
            StudySession::new(now - Duration::days(2), 10, 8, 300),
            StudySession::new(now - Duration::days(20), 10, 8, 300),
        ];

        let snap = Snapshot {
            cards,
            reviews,
            sessions,
            ..Snapshot::default()
        };

        let week = build_statistics(&snap, now, Some(7), true);
        assert_eq!(week.retention.total_reviews, 4);
        assert_eq!(week.retention.overall, 100);
        assert_eq!(week.sessions.total, 1);
        // Cards always reflect the whole collection.
        assert_eq!(week.cards.total, 2);

        let full = build_statistics(&snap, now, None, true);
        assert_eq!(full.retention.total_reviews, 8);
        assert_eq!(full.sessions.total, 2);
    }
}
