use crate::models::{Card, CardStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Cards grouped by derived status. The four status buckets partition the
/// input; `overdue` is filled independently and may repeat cards from any
/// bucket.
#[derive(Clone, Debug, Default)]
pub struct CardBuckets {
    pub new: Vec<Card>,
    pub learning: Vec<Card>,
    pub review: Vec<Card>,
    pub mature: Vec<Card>,
    pub overdue: Vec<Card>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardCounts {
    pub total: u32,
    pub new: u32,
    pub learning: u32,
    pub review: u32,
    pub mature: u32,
    pub overdue: u32,
}

impl CardBuckets {
    pub fn counts(&self) -> CardCounts {
        CardCounts {
            total: (self.new.len() + self.learning.len() + self.review.len() + self.mature.len())
                as u32,
            new: self.new.len() as u32,
            learning: self.learning.len() as u32,
            review: self.review.len() as u32,
            mature: self.mature.len() as u32,
            overdue: self.overdue.len() as u32,
        }
    }
}

pub fn classify_cards(cards: &[Card], today: NaiveDate) -> CardBuckets {
    let mut buckets = CardBuckets::default();
    for card in cards {
        match card.status() {
            CardStatus::New => buckets.new.push(card.clone()),
            CardStatus::Learning => buckets.learning.push(card.clone()),
            CardStatus::Review => buckets.review.push(card.clone()),
            CardStatus::Mature => buckets.mature.push(card.clone()),
        }
        if card.is_overdue(today) {
            buckets.overdue.push(card.clone());
        }
    }
    buckets
}
