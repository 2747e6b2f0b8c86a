use crate::{Card, CoreError, Review, StreakSeed, StudySession, TopicProgress};
use async_trait::async_trait;

pub mod memory;

#[async_trait]
pub trait Repository: Send + Sync {
    // Cards
    async fn add_card(&self, card: &Card) -> Result<(), CoreError>;
    async fn list_cards(&self, paper: Option<&str>) -> Result<Vec<Card>, CoreError>;

    // Activity
    async fn add_review(&self, review: &Review) -> Result<(), CoreError>;
    async fn list_reviews(&self) -> Result<Vec<Review>, CoreError>;
    async fn add_session(&self, session: &StudySession) -> Result<(), CoreError>;
    async fn list_sessions(&self) -> Result<Vec<StudySession>, CoreError>;

    // Progress
    async fn set_progress(&self, progress: &TopicProgress) -> Result<(), CoreError>;
    async fn list_progress(&self) -> Result<Vec<TopicProgress>, CoreError>;
    async fn set_streak_seed(&self, seed: StreakSeed) -> Result<(), CoreError>;
    async fn streak_seed(&self) -> Result<Option<StreakSeed>, CoreError>;
}
