use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::opportunities::discovery::{discover_opportunities, OpportunityReport};
use crate::opportunities::profile::StudentProfile;
use crate::state::AppState;

/// POST /api/v1/opportunities
pub async fn handle_find_opportunities(
    State(state): State<AppState>,
    Json(profile): Json<StudentProfile>,
) -> Result<Json<OpportunityReport>, AppError> {
    let report = discover_opportunities(&state.search, &state.groq, &profile).await?;
    Ok(Json(report))
}
