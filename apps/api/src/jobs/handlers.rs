use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::repository::{JobRepository, PgJobRepository};
use crate::jobs::signals::{staleness, Staleness};
use crate::state::AppState;

#[derive(Serialize)]
pub struct StalenessResponse {
    pub job_id: i64,
    #[serde(flatten)]
    pub staleness: Staleness,
}

/// GET /jobs/:id/staleness
pub async fn handle_staleness(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<StalenessResponse>, AppError> {
    let job = PgJobRepository::new(state.db.clone())
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(Json(StalenessResponse {
        job_id,
        staleness: staleness(&job, Utc::now().date_naive()),
    }))
}
