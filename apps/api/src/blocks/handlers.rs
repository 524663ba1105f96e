use std::path::Path as FsPath;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::blocks::ingest::{ingest, read_source};
use crate::blocks::models::{Block, StrengthLevel};
use crate::blocks::repository::{import_blocks, BlockRepository, PgBlockRepository};
use crate::blocks::store::{BlockFilter, BlockStats, BlockStore};
use crate::errors::AppError;
use crate::jobs::repository::{JobRepository, PgJobRepository};
use crate::matching::customize::{customize_block, job_context_for};
use crate::state::AppState;

/// Query string for GET /lego-blocks. List filters are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct BlockQuery {
    pub category: Option<String>,
    pub role_type: Option<String>,
    pub skills: Option<String>,
    pub keywords: Option<String>,
    pub min_strength: Option<StrengthLevel>,
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl From<BlockQuery> for BlockFilter {
    fn from(query: BlockQuery) -> Self {
        BlockFilter {
            category: query.category,
            role_type: query.role_type,
            skills: split_list(query.skills),
            keywords: split_list(query.keywords),
            min_strength: query.min_strength,
        }
    }
}

async fn load_store(state: &AppState) -> Result<BlockStore, AppError> {
    let repo = PgBlockRepository::new(state.db.clone());
    Ok(BlockStore::from_blocks(repo.list_all_blocks().await?))
}

/// GET /lego-blocks
pub async fn handle_list_blocks(
    State(state): State<AppState>,
    Query(query): Query<BlockQuery>,
) -> Result<Json<Vec<Block>>, AppError> {
    let store = load_store(&state).await?;
    let filter = BlockFilter::from(query);
    Ok(Json(store.search(&filter).into_iter().cloned().collect()))
}

/// GET /lego-blocks/stats
pub async fn handle_block_stats(
    State(state): State<AppState>,
) -> Result<Json<BlockStats>, AppError> {
    let store = load_store(&state).await?;
    Ok(Json(store.summary_stats()))
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub skipped: usize,
    pub message: String,
}

/// POST /lego-blocks/import
///
/// Re-reads the configured outline file and inserts blocks not seen before.
pub async fn handle_import_blocks(
    State(state): State<AppState>,
) -> Result<Json<ImportResponse>, AppError> {
    let source = read_source(FsPath::new(&state.config.blocks_source_path)).await?;
    let blocks = ingest(&source)?;

    let repo = PgBlockRepository::new(state.db.clone());
    let summary = import_blocks(&repo, &blocks).await?;

    Ok(Json(ImportResponse {
        message: format!(
            "Imported {} blocks, skipped {} duplicates",
            summary.imported, summary.skipped
        ),
        imported: summary.imported,
        skipped: summary.skipped,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CustomizeRequest {
    pub job_context: Option<String>,
    pub job_id: Option<i64>,
}

#[derive(Serialize)]
pub struct CustomizeResponse {
    pub block_id: i64,
    pub original_content: String,
    pub customized_content: String,
}

/// POST /lego-blocks/:id/customize
///
/// Tailors a block's wording for a job. The stored block is left untouched.
pub async fn handle_customize_block(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CustomizeRequest>,
) -> Result<Json<CustomizeResponse>, AppError> {
    let block = PgBlockRepository::new(state.db.clone())
        .find_block(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Block {id} not found")))?;

    let job_context = match (req.job_context, req.job_id) {
        (Some(context), _) if !context.trim().is_empty() => context,
        (_, Some(job_id)) => {
            let job = PgJobRepository::new(state.db.clone())
                .find_job(job_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
            job_context_for(&job)
        }
        _ => {
            return Err(AppError::Validation(
                "Either job_context or job_id is required".to_string(),
            ))
        }
    };

    let customized_content = customize_block(state.llm.as_ref(), &block, &job_context).await;

    Ok(Json(CustomizeResponse {
        block_id: id,
        original_content: block.content,
        customized_content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_lists_are_comma_separated() {
        let query: BlockQuery =
            parse_query("skills=Python,%20SQL,&min_strength=strong&category=scale");
        let filter = BlockFilter::from(query);
        assert_eq!(filter.skills, vec!["Python", "SQL"]);
        assert!(filter.keywords.is_empty());
        assert_eq!(filter.min_strength, Some(StrengthLevel::Strong));
        assert_eq!(filter.category.as_deref(), Some("scale"));
    }

    fn parse_query(qs: &str) -> BlockQuery {
        let uri: axum::http::Uri = format!("/lego-blocks?{qs}").parse().unwrap();
        Query::<BlockQuery>::try_from_uri(&uri).unwrap().0
    }
}
