use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use examtrack_core::{
    classify_cards, compute_statistics, paper_breakdown, retention, summarize_sessions, Card,
    Review, SessionSummary, StatsRequest, StreakSeed, StreakSource, StudySession, Trend,
    VolumeTrend,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn card(paper: &str, reps: u32, interval_days: u32, due: NaiveDate) -> Card {
    let mut c = Card::new(paper, due);
    c.reps = reps;
    c.interval_days = interval_days;
    c
}

#[test]
fn classifies_every_card_once() {
    let today = day(14);
    let cards = vec![
        card("paper1", 0, 0, day(14)),
        card("paper1", 2, 5, day(13)),
        card("paper2", 4, 21, day(15)),
        card("paper2", 5, 30, day(4)),
    ];

    let buckets = classify_cards(&cards, today);
    let counts = buckets.counts();

    assert_eq!(counts.total, 4);
    assert_eq!(counts.new, 1);
    assert_eq!(counts.learning, 1);
    assert_eq!(counts.review, 1);
    assert_eq!(counts.mature, 1);
    assert_eq!(
        counts.new + counts.learning + counts.review + counts.mature,
        counts.total
    );
    // The learning card and the mature card are past due.
    assert_eq!(counts.overdue, 2);
}

#[test]
fn retention_rounds_to_whole_percent() {
    let id = Card::new("paper1", day(14)).id;
    let reviews: Vec<Review> = (0..10)
        .map(|i| Review::new(id, now() - Duration::hours(i), i < 7))
        .collect();

    let r = retention(&reviews);
    assert_eq!(r.total_reviews, 10);
    assert_eq!(r.correct_reviews, 7);
    assert_eq!(r.overall, 70);

    let empty = retention(&[]);
    assert_eq!(empty.overall, 0);
    assert_eq!(empty.total_reviews, 0);
}

#[test]
fn paper_breakdown_keys_every_requested_paper() {
    let papers: Vec<String> = vec!["paper1".into(), "paper2".into(), "paper3".into()];
    let mut cards = vec![
        card("paper1", 4, 25, day(20)),
        card("paper1", 4, 25, day(21)),
        card("paper1", 4, 25, day(22)),
        card("paper2", 0, 0, day(14)),
        card("paper2", 0, 0, day(14)),
    ];
    cards[0].ef = 2.1;
    cards[1].ef = 2.5;
    cards[2].ef = 2.9;

    let reviews: Vec<Review> = (0..4)
        .map(|i| Review::new(cards[0].id, now() - Duration::hours(i), i < 3))
        .collect();

    let breakdown = paper_breakdown(&cards, &reviews, &papers);

    assert_eq!(breakdown.len(), 3);
    let p1 = &breakdown["paper1"];
    assert_eq!(p1.total_cards, 3);
    assert_eq!(p1.mature_cards, 3);
    assert_eq!(p1.total_reviews, 4);
    assert_eq!(p1.accuracy, 75);
    assert_eq!(p1.average_ef, 2.5);
    assert_eq!(p1.average_interval, 25);

    let p2 = &breakdown["paper2"];
    assert_eq!(p2.total_cards, 2);
    assert_eq!(p2.mature_cards, 0);
    assert_eq!(p2.accuracy, 0);

    let p3 = &breakdown["paper3"];
    assert_eq!(p3.total_cards, 0);
    assert_eq!(p3.total_reviews, 0);

    let across: u32 = breakdown.values().map(|p| p.total_cards).sum();
    assert_eq!(across, cards.len() as u32);
}

#[test]
fn empty_sessions_mean_zero_summary() {
    assert_eq!(summarize_sessions(&[], now()), SessionSummary::default());
}

#[test]
fn an_active_week_in_numbers() {
    let sessions = vec![
        StudySession::new(now(), 20, 15, 600),
        StudySession::new(now() - Duration::days(3), 10, 8, 300),
        StudySession::new(now() - Duration::days(20), 30, 21, 900),
    ];

    let s = summarize_sessions(&sessions, now());
    assert_eq!(s.total, 3);
    assert_eq!(s.average_questions, 20);
    // 44 correct out of 60 questions.
    assert_eq!(s.average_accuracy, 73);
    assert_eq!(s.average_duration, 600);
    assert_eq!(s.longest_session, 900);
    assert_eq!(s.total_time, 1800);
    assert_eq!(s.this_week, 2);
    assert_eq!(s.this_month, 3);
}

#[test]
fn improving_reviews_move_the_trend() {
    let id = Card::new("paper1", day(14)).id;
    // Newest first: six correct answers, then six misses.
    let reviews: Vec<Review> = (0..12)
        .map(|i| Review::new(id, now() - Duration::hours(i), i < 6))
        .collect();

    let streak = StreakSource::Dates(vec![]);
    let req = StatsRequest {
        cards: &[],
        reviews: &reviews,
        sessions: &[],
        streak: &streak,
        progress: &[],
        papers: &[],
        now: now(),
    };
    let stats = compute_statistics(&req);

    assert_eq!(stats.trends.accuracy_trend, Trend::Improving);
    assert_eq!(stats.retention.overall, 50);
}

#[test]
fn empty_inputs_zero_the_dashboard() {
    let streak = StreakSource::Dates(vec![]);
    let req = StatsRequest {
        cards: &[],
        reviews: &[],
        sessions: &[],
        streak: &streak,
        progress: &[],
        papers: &[],
        now: now(),
    };
    let stats = compute_statistics(&req);

    assert_eq!(stats.cards.total, 0);
    assert_eq!(stats.retention.overall, 0);
    assert_eq!(stats.sessions, SessionSummary::default());
    assert_eq!(stats.time.average_response_time, 0);
    assert!(stats.papers.is_empty());
    assert_eq!(stats.difficulty.average_difficulty, 0.0);
    assert_eq!(stats.difficulty.correlation_accuracy, 0.0);
    assert_eq!(stats.trends.accuracy_trend, Trend::InsufficientData);
    assert_eq!(stats.trends.speed_trend, Trend::InsufficientData);
    assert_eq!(stats.trends.volume_trend, VolumeTrend::InsufficientData);
    assert!(stats.trends.weekly_progress.is_empty());
    assert_eq!(stats.streak.current, 0);
    assert!(stats.achievements.unlocked.is_empty());
    assert_eq!(stats.achievements.next_milestones.len(), 3);
    assert!(stats.recommendations.is_empty());
}

#[test]
fn streak_source_strategies() {
    let seed = StreakSource::Seed(StreakSeed {
        current: 4,
        longest: 9,
        total_days: 20,
    });
    let req = StatsRequest {
        cards: &[],
        reviews: &[],
        sessions: &[],
        streak: &seed,
        progress: &[],
        papers: &[],
        now: now(),
    };
    let seeded = compute_statistics(&req);
    assert_eq!(seeded.streak.current, 4);
    assert_eq!(seeded.streak.longest, 9);
    assert_eq!(seeded.streak.total_days, 20);

    let dates = StreakSource::Dates(vec![day(14), day(13), day(12)]);
    let req = StatsRequest {
        cards: &[],
        reviews: &[],
        sessions: &[],
        streak: &dates,
        progress: &[],
        papers: &[],
        now: now(),
    };
    let walked = compute_statistics(&req);
    assert_eq!(walked.streak.current, 3);
    assert_eq!(walked.streak.longest, 3);
}

#[test]
fn dashboard_uses_camel_case_keys() {
    let streak = StreakSource::Dates(vec![day(14)]);
    let req = StatsRequest {
        cards: &[],
        reviews: &[],
        sessions: &[],
        streak: &streak,
        progress: &[],
        papers: &[],
        now: now(),
    };
    let stats = compute_statistics(&req);
    let v = serde_json::to_value(&stats).unwrap();

    assert!(v["retention"]["totalReviews"].is_u64());
    assert!(v["sessions"]["thisWeek"].is_u64());
    assert!(v["time"]["averageResponseTime"].is_u64());
    assert_eq!(v["trends"]["accuracyTrend"], "insufficient_data");
    assert!(v["achievements"]["nextMilestones"].is_array());
    assert!(v["recommendations"].is_array());
}
