use crate::models::StudySession;
use crate::stats::retention::Retention;
use crate::stats::streak::StreakStats;
use serde::Serialize;

const MAX_MILESTONES: usize = 3;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Cards,
    Streak,
    Accuracy,
    Volume,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BadgeLevel {
    Beginner,
    Advanced,
    Expert,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub kind: AchievementKind,
    pub level: BadgeLevel,
    pub title: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub kind: AchievementKind,
    pub target: u32,
    pub current: u32,
    pub title: &'static str,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementReport {
    pub unlocked: Vec<Badge>,
    pub next_milestones: Vec<Milestone>,
}

struct Tier {
    threshold: u32,
    level: BadgeLevel,
    title: &'static str,
}

const fn tier(threshold: u32, level: BadgeLevel, title: &'static str) -> Tier {
    Tier {
        threshold,
        level,
        title,
    }
}

// Thresholds ascend within each table.
const CARD_TIERS: [Tier; 3] = [
    tier(10, BadgeLevel::Beginner, "First Ten"),
    tier(50, BadgeLevel::Advanced, "Half Century"),
    tier(100, BadgeLevel::Expert, "Century Club"),
];

const STREAK_TIERS: [Tier; 3] = [
    tier(3, BadgeLevel::Beginner, "Warming Up"),
    tier(7, BadgeLevel::Advanced, "Week Strong"),
    tier(30, BadgeLevel::Expert, "Unstoppable"),
];

const ACCURACY_TIERS: [Tier; 3] = [
    tier(70, BadgeLevel::Beginner, "Solid Ground"),
    tier(80, BadgeLevel::Advanced, "Sharp"),
    tier(90, BadgeLevel::Expert, "Laser Focused"),
];

const VOLUME_TIERS: [Tier; 3] = [
    tier(100, BadgeLevel::Beginner, "Getting Going"),
    tier(500, BadgeLevel::Advanced, "Question Grinder"),
    tier(1000, BadgeLevel::Expert, "Thousand Club"),
];

/// One badge per category at most, for the highest threshold already met.
/// Milestones are the nearest unmet threshold per category, capped at
/// three in category order, so the list stays short enough to show whole.
pub fn evaluate_achievements(
    card_count: u32,
    sessions: &[StudySession],
    streak: &StreakStats,
    retention: &Retention,
) -> AchievementReport {
    let questions: u32 = sessions.iter().map(|s| s.questions).sum();
    let progress = [
        (AchievementKind::Cards, &CARD_TIERS, card_count),
        (AchievementKind::Streak, &STREAK_TIERS, streak.current),
        (AchievementKind::Accuracy, &ACCURACY_TIERS, retention.overall),
        (AchievementKind::Volume, &VOLUME_TIERS, questions),
    ];

    let mut report = AchievementReport::default();
    for (kind, tiers, current) in progress {
        if let Some(t) = tiers.iter().rev().find(|t| current >= t.threshold) {
            report.unlocked.push(Badge {
                kind,
                level: t.level,
                title: t.title,
            });
        }
        if let Some(t) = tiers.iter().find(|t| current < t.threshold) {
            report.next_milestones.push(Milestone {
                kind,
                target: t.threshold,
                current,
                title: t.title,
            });
        }
    }
    report.next_milestones.truncate(MAX_MILESTONES);
    report
}
