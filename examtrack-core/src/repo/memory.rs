use crate::{Card, CoreError, Review, StreakSeed, StudySession, TopicProgress};
use async_trait::async_trait;
use parking_lot::RwLock;

/// In-memory store. List methods hand back activity newest-first, which is
/// the ordering the statistics engine expects.
#[derive(Default)]
pub struct MemoryRepo {
    cards: RwLock<Vec<Card>>,
    reviews: RwLock<Vec<Review>>,
    sessions: RwLock<Vec<StudySession>>,
    progress: RwLock<Vec<TopicProgress>>,
    streak: RwLock<Option<StreakSeed>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
    async fn add_card(&self, card: &Card) -> Result<(), CoreError> {
        if card.paper.trim().is_empty() {
            return Err(CoreError::Invalid("card paper is required"));
        }
        let mut cards = self.cards.write();
        if cards.iter().any(|c| c.id == card.id) {
            return Err(CoreError::Conflict("card id already exists"));
        }
        cards.push(card.clone());
        Ok(())
    }

    async fn list_cards(&self, paper: Option<&str>) -> Result<Vec<Card>, CoreError> {
        let mut v = self.cards.read().clone();
        if let Some(p) = paper {
            v.retain(|c| c.paper == p);
        }
        Ok(v)
    }

    async fn add_review(&self, review: &Review) -> Result<(), CoreError> {
        self.reviews.write().push(review.clone());
        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, CoreError> {
        let mut v = self.reviews.read().clone();
        v.sort_by(|a, b| b.reviewed_at.cmp(&a.reviewed_at));
        Ok(v)
    }

    async fn add_session(&self, session: &StudySession) -> Result<(), CoreError> {
        if session.correct > session.questions {
            return Err(CoreError::Invalid("correct exceeds questions"));
        }
        self.sessions.write().push(session.clone());
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<StudySession>, CoreError> {
        let mut v = self.sessions.read().clone();
        v.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(v)
    }

    async fn set_progress(&self, progress: &TopicProgress) -> Result<(), CoreError> {
        let mut v = self.progress.write();
        match v
            .iter_mut()
            .find(|p| p.topic.eq_ignore_ascii_case(&progress.topic))
        {
            Some(existing) => *existing = progress.clone(),
            None => v.push(progress.clone()),
        }
        Ok(())
    }

    async fn list_progress(&self) -> Result<Vec<TopicProgress>, CoreError> {
        Ok(self.progress.read().clone())
    }

    async fn set_streak_seed(&self, seed: StreakSeed) -> Result<(), CoreError> {
        *self.streak.write() = Some(seed);
        Ok(())
    }

    async fn streak_seed(&self) -> Result<Option<StreakSeed>, CoreError> {
        Ok(*self.streak.read())
    }
}
