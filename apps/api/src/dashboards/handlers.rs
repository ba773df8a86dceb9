use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::dashboards::admin::{load_overview, AdminOverview};
use crate::dashboards::recruiter::{list_candidates, Candidate, CandidateQuery};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    pub count: usize,
    pub candidates: Vec<Candidate>,
}

/// GET /api/v1/recruiter/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<CandidatesResponse>, AppError> {
    let filter = query.into_filter()?;
    let candidates = list_candidates(&state.db, &filter).await?;
    Ok(Json(CandidatesResponse {
        count: candidates.len(),
        candidates,
    }))
}

/// GET /api/v1/admin/overview
pub async fn handle_admin_overview(
    State(state): State<AppState>,
) -> Result<Json<AdminOverview>, AppError> {
    Ok(Json(load_overview(&state.db).await?))
}
