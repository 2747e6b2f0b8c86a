use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use examtrack_core::Statistics;

use crate::snapshot::{self, Snapshot};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn examtrack_core::Repository>,
    pub papers: Vec<String>,
}

#[derive(Deserialize)]
pub struct StatsQuery {
    period: Option<i64>,
    include_recommendations: Option<bool>,
}

pub async fn get_stats(
    State(st): State<Arc<AppState>>,
    Query(q): Query<StatsQuery>,
) -> Result<Json<Statistics>, StatusCode> {
    let now = chrono::Utc::now();
    let cards = st.repo.list_cards(None).await.map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let reviews = st.repo.list_reviews().await.map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let sessions = st.repo.list_sessions().await.map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let progress = st.repo.list_progress().await.map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let streak = st.repo.streak_seed().await.map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let snap = Snapshot {
        cards,
        reviews,
        sessions,
        streak,
        progress,
        papers: st.papers.clone(),
    };
    let stats = snapshot::build_statistics(
        &snap,
        now,
        q.period,
        q.include_recommendations.unwrap_or(true),
    );
    Ok(Json(stats))
}
