use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blocks::repository::{BlockRepository, PgBlockRepository};
use crate::errors::AppError;
use crate::jobs::models::ExperienceLevel;
use crate::jobs::repository::{JobRepository, PgJobRepository};
use crate::jobs::requirements::JobRequirementVector;
use crate::jobs::signals::{experience_level_for, salary_range_for, SalaryRange};
use crate::matching::relevance::{rank_report, BlockSuggestion};
use crate::matching::selector::{select_blocks_for_job, SelectedBlock};
use crate::render::latex::{render_document, DEFAULT_TEMPLATE};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CvSuggestionsResponse {
    pub job_id: i64,
    pub experience_level: ExperienceLevel,
    pub salary: SalaryRange,
    pub requirement_vector: JobRequirementVector,
    pub suggestions: Vec<BlockSuggestion>,
}

/// GET /jobs/:id/cv-suggestions
///
/// Every block ranked against the job, with display scores in [0, 100].
pub async fn handle_cv_suggestions(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<CvSuggestionsResponse>, AppError> {
    let job = PgJobRepository::new(state.db.clone())
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let blocks = PgBlockRepository::new(state.db.clone())
        .list_all_blocks()
        .await?;
    let vector = JobRequirementVector::from_job(&job);
    let suggestions = rank_report(&blocks, &vector);

    Ok(Json(CvSuggestionsResponse {
        job_id,
        experience_level: experience_level_for(&job),
        salary: salary_range_for(&job),
        requirement_vector: vector,
        suggestions,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateCvRequest {
    pub max_blocks: Option<usize>,
    pub template: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateCvResponse {
    pub cv_id: Uuid,
    pub selector: &'static str,
    pub selected_blocks: Vec<SelectedBlock>,
    pub latex: String,
}

/// POST /jobs/:id/generate-cv
///
/// Selects blocks, renders them, records the generated CV against the job.
pub async fn handle_generate_cv(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Json(req): Json<GenerateCvRequest>,
) -> Result<Json<GenerateCvResponse>, AppError> {
    let max_blocks = req.max_blocks.unwrap_or(state.config.default_max_blocks);
    let template = req.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);

    let jobs = PgJobRepository::new(state.db.clone());
    let blocks = PgBlockRepository::new(state.db.clone());
    let (_, selected) =
        select_blocks_for_job(&jobs, &blocks, state.selector.as_ref(), job_id, max_blocks).await?;

    let chosen: Vec<_> = selected.iter().map(|s| s.block.clone()).collect();
    let latex = render_document(&chosen, template)?;

    let block_ids: Vec<i64> = chosen.iter().filter_map(|b| b.id).collect();
    let cv_id = jobs.record_generated_cv(job_id, &block_ids).await?;

    Ok(Json(GenerateCvResponse {
        cv_id,
        selector: state.selector.name(),
        selected_blocks: selected,
        latex,
    }))
}
