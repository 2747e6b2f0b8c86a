use crate::models::{Card, CardId, Review};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::retention::retention_by;
use super::round_div;

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaperStats {
    pub total_cards: u32,
    pub total_reviews: u32,
    pub accuracy: u32,
    pub average_ef: f32,
    /// Days, rounded.
    pub average_interval: u32,
    pub mature_cards: u32,
}

/// Per-paper rollup of cards and their reviews. Reviews carry only a card
/// id, so the paper of each review comes from an id index built once up
/// front; reviews pointing at unknown cards are ignored.
pub fn paper_breakdown(
    cards: &[Card],
    reviews: &[Review],
    papers: &[String],
) -> BTreeMap<String, PaperStats> {
    let card_paper: HashMap<CardId, &str> =
        cards.iter().map(|c| (c.id, c.paper.as_str())).collect();

    let review_stats = retention_by(reviews, |r| card_paper.get(&r.card_id).copied());

    let mut out = BTreeMap::new();
    for paper in papers {
        let mut total_cards = 0u32;
        let mut mature_cards = 0u32;
        let mut ef_sum = 0.0f32;
        let mut interval_sum = 0u32;
        for card in cards.iter().filter(|c| &c.paper == paper) {
            total_cards += 1;
            ef_sum += card.ef;
            interval_sum += card.interval_days;
            if card.is_mature() {
                mature_cards += 1;
            }
        }

        let ret = review_stats.get(paper.as_str()).copied().unwrap_or_default();

        out.insert(
            paper.clone(),
            PaperStats {
                total_cards,
                total_reviews: ret.total_reviews,
                accuracy: ret.overall,
                average_ef: if total_cards == 0 {
                    0.0
                } else {
                    round2(ef_sum / total_cards as f32)
                },
                average_interval: round_div(interval_sum, total_cards),
                mature_cards,
            },
        );
    }
    out
}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}
