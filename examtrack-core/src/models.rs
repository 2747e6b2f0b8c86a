use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CardId = Uuid;

pub const EF_DEFAULT: f32 = 2.5;

/// Interval (days) past which a card with enough repetitions counts as mature.
/// Shared by the classifier and the per-paper mature count.
pub const MATURE_INTERVAL_DAYS: u32 = 21;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Mature,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub paper: String,
    #[serde(default = "default_ef")]
    pub ef: f32,
    #[serde(default)]
    pub interval_days: u32,
    #[serde(default)]
    pub reps: u32,
    pub due_date: NaiveDate,
}

fn default_ef() -> f32 {
    EF_DEFAULT
}

impl Card {
    pub fn new(paper: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            paper: paper.into(),
            ef: EF_DEFAULT,
            interval_days: 0,
            reps: 0,
            due_date,
        }
    }

    pub fn is_new(&self) -> bool {
        self.reps == 0
    }

    pub fn is_mature(&self) -> bool {
        self.reps >= 3 && self.interval_days > MATURE_INTERVAL_DAYS
    }

    /// Overdue is an overlay on top of the status partition, not a fifth
    /// status: a mature card with a missed due date is both mature and
    /// overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }

    pub fn status(&self) -> CardStatus {
        if self.is_new() {
            CardStatus::New
        } else if self.is_mature() {
            CardStatus::Mature
        } else if self.interval_days < MATURE_INTERVAL_DAYS {
            CardStatus::Learning
        } else {
            CardStatus::Review
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub card_id: CardId,
    pub reviewed_at: DateTime<Utc>,
    #[serde(default)]
    pub correct: bool,
    /// Seconds spent answering; absent or zero means "not measured".
    #[serde(default)]
    pub time_taken: Option<u32>,
    /// Self-rated difficulty, 1 (easy) to 5 (hard).
    #[serde(default)]
    pub difficulty: Option<u8>,
}

impl Review {
    pub fn new(card_id: CardId, reviewed_at: DateTime<Utc>, correct: bool) -> Self {
        Self {
            card_id,
            reviewed_at,
            correct,
            time_taken: None,
            difficulty: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StudySession {
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub questions: u32,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub duration_secs: u32,
}

impl StudySession {
    pub fn new(completed_at: DateTime<Utc>, questions: u32, correct: u32, duration_secs: u32) -> Self {
        Self {
            completed_at,
            questions,
            correct,
            duration_secs,
        }
    }
}

/// Streak numbers precomputed by an external source (e.g. a database-side
/// routine) and passed through unchanged.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StreakSeed {
    pub current: u32,
    pub longest: u32,
    pub total_days: u32,
}

/// Per-topic progress supplied by the caller; input to the recommendation
/// engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TopicProgress {
    pub topic: String,
    #[serde(default)]
    pub accuracy: u32,
    #[serde(default)]
    pub last_practiced: Option<DateTime<Utc>>,
}

impl TopicProgress {
    pub fn new(topic: impl Into<String>, accuracy: u32) -> Self {
        Self {
            topic: topic.into(),
            accuracy,
            last_practiced: None,
        }
    }
}
