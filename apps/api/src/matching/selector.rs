//! Block selection: a pluggable, trait-based strategy that picks the top-N
//! blocks for a job.
//!
//! `HeuristicSelector` is the deterministic default. `LlmSelector` asks Claude
//! for block ids. `FallbackSelector` composes the two: try the primary, and on
//! any error log it and use the heuristic.
//!
//! `AppState` holds an `Arc<dyn BlockSelector>` chosen at startup.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::blocks::models::Block;
use crate::blocks::repository::BlockRepository;
use crate::errors::AppError;
use crate::jobs::models::JobRecord;
use crate::jobs::repository::JobRepository;
use crate::jobs::requirements::JobRequirementVector;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{extract_json_array, LlmClient};
use crate::matching::fallback::select_by_overlap;
use crate::matching::prompts::block_selection_prompt;
use crate::matching::relevance::{rank, score_block};

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedBlock {
    pub block: Block,
    /// Heuristic relevance score, whichever strategy picked the block.
    pub score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait BlockSelector: Send + Sync {
    /// Short backend name for logs and responses.
    fn name(&self) -> &'static str;

    async fn select(
        &self,
        job: &JobRecord,
        blocks: &[Block],
        max_blocks: usize,
    ) -> Result<Vec<SelectedBlock>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicSelector
// ────────────────────────────────────────────────────────────────────────────

/// Top-N by relevance score. When no block has any textual or role overlap,
/// falls through to the keyword-overlap scorer so the result is only empty
/// when nothing overlaps at all.
pub struct HeuristicSelector;

impl HeuristicSelector {
    pub fn select_sync(job: &JobRecord, blocks: &[Block], max_blocks: usize) -> Vec<SelectedBlock> {
        let vector = JobRequirementVector::from_job(job);
        let ranked = rank(blocks, &vector);

        if ranked.iter().any(|s| s.breakdown.match_points() > 0.0) {
            return ranked
                .into_iter()
                .take(max_blocks)
                .map(|s| SelectedBlock {
                    score: s.score(),
                    block: s.block.clone(),
                })
                .collect();
        }

        debug!("No relevance overlap for job {}, using keyword overlap", job.id);
        select_by_overlap(job, blocks, max_blocks)
            .into_iter()
            .map(|(block, _)| SelectedBlock {
                score: score_block(block, &vector).score(),
                block: block.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl BlockSelector for HeuristicSelector {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn select(
        &self,
        job: &JobRecord,
        blocks: &[Block],
        max_blocks: usize,
    ) -> Result<Vec<SelectedBlock>, AppError> {
        Ok(Self::select_sync(job, blocks, max_blocks))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSelector
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmSelector(pub LlmClient);

#[async_trait]
impl BlockSelector for LlmSelector {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn select(
        &self,
        job: &JobRecord,
        blocks: &[Block],
        max_blocks: usize,
    ) -> Result<Vec<SelectedBlock>, AppError> {
        let prompt = block_selection_prompt(job, blocks, max_blocks);
        let response = self.0.call_text(&prompt, JSON_ONLY_SYSTEM).await?;

        pick_blocks_by_ids(&response, job, blocks, max_blocks)
    }
}

/// Maps an LLM answer to blocks. Blocks come back in library order, capped at
/// `max_blocks`; unknown ids are ignored.
pub fn pick_blocks_by_ids(
    response: &str,
    job: &JobRecord,
    blocks: &[Block],
    max_blocks: usize,
) -> Result<Vec<SelectedBlock>, AppError> {
    let array = extract_json_array(response)
        .ok_or_else(|| AppError::Llm("selection response has no JSON array".to_string()))?;
    let ids: HashSet<i64> = serde_json::from_str::<Vec<i64>>(array)
        .map_err(|e| AppError::Llm(format!("selection response is not an id array: {e}")))?
        .into_iter()
        .collect();

    let vector = JobRequirementVector::from_job(job);
    let selected: Vec<SelectedBlock> = blocks
        .iter()
        .filter(|b| b.id.is_some_and(|id| ids.contains(&id)))
        .take(max_blocks)
        .map(|b| SelectedBlock {
            score: score_block(b, &vector).score(),
            block: b.clone(),
        })
        .collect();

    if selected.is_empty() {
        return Err(AppError::Llm(
            "selection response named no known blocks".to_string(),
        ));
    }
    Ok(selected)
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackSelector
// ────────────────────────────────────────────────────────────────────────────

pub struct FallbackSelector {
    primary: Arc<dyn BlockSelector>,
    fallback: HeuristicSelector,
}

impl FallbackSelector {
    pub fn new(primary: Arc<dyn BlockSelector>) -> Self {
        Self {
            primary,
            fallback: HeuristicSelector,
        }
    }
}

#[async_trait]
impl BlockSelector for FallbackSelector {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn select(
        &self,
        job: &JobRecord,
        blocks: &[Block],
        max_blocks: usize,
    ) -> Result<Vec<SelectedBlock>, AppError> {
        match self.primary.select(job, blocks, max_blocks).await {
            Ok(selected) => Ok(selected),
            Err(e) => {
                warn!(
                    "{} selector failed for job {}: {e}; using heuristic",
                    self.primary.name(),
                    job.id
                );
                self.fallback.select(job, blocks, max_blocks).await
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Loads the job and the block library and selects up to `max_blocks`.
/// An unknown job is an error; an empty library is an empty selection.
pub async fn select_blocks_for_job(
    jobs: &dyn JobRepository,
    blocks: &dyn BlockRepository,
    selector: &dyn BlockSelector,
    job_id: i64,
    max_blocks: usize,
) -> Result<(JobRecord, Vec<SelectedBlock>), AppError> {
    let job = jobs
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let library = blocks.list_all_blocks().await?;
    if library.is_empty() || max_blocks == 0 {
        return Ok((job, Vec::new()));
    }

    let selected = selector.select(&job, &library, max_blocks).await?;
    info!(
        "Selected {} of {} blocks for job {job_id} via {}",
        selected.len(),
        library.len(),
        selector.name()
    );
    Ok((job, selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::classify::classify;
    use crate::blocks::repository::MemoryBlockRepository;
    use crate::jobs::repository::MemoryJobRepository;

    struct FailingSelector;

    #[async_trait]
    impl BlockSelector for FailingSelector {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn select(
            &self,
            _job: &JobRecord,
            _blocks: &[Block],
            _max_blocks: usize,
        ) -> Result<Vec<SelectedBlock>, AppError> {
            Err(AppError::Llm("upstream unavailable".into()))
        }
    }

    fn library() -> Vec<Block> {
        let mut blocks = vec![
            classify(
                "MACHINE LEARNING & DATA SCIENCE",
                None,
                "Recommendations",
                "Built a recommendation model serving 20M users",
            ),
            classify(
                "DEVOPS & OPERATIONAL EXCELLENCE",
                None,
                "Pipelines",
                "Implemented CI/CD pipelines for 30 services",
            ),
            classify(
                "SYSTEM ARCHITECTURE & DESIGN",
                None,
                "Gateway",
                "Designed an API gateway",
            ),
        ];
        for (i, b) in blocks.iter_mut().enumerate() {
            b.id = Some(i as i64 + 1);
        }
        blocks
    }

    fn ml_job() -> JobRecord {
        JobRecord {
            id: 9,
            role: Some("ML Engineer".into()),
            parsed_skills: Some(vec!["Machine Learning".into()]),
            parsed_requirements: Some(vec!["recommendation".into()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_heuristic_takes_top_n() {
        let selected = HeuristicSelector::select_sync(&ml_job(), &library(), 2);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].block.title, "Recommendations");
        assert!(selected[0].score >= selected[1].score);
    }

    #[test]
    fn test_heuristic_falls_back_to_keyword_overlap() {
        // Nothing in requirements/skills/role overlaps; only the role word
        // "pipelines" reaches the overlap scorer.
        let job = JobRecord {
            id: 3,
            role: Some("Pipelines Specialist".into()),
            ..Default::default()
        };
        let selected = HeuristicSelector::select_sync(&job, &library(), 5);
        let titles: Vec<&str> = selected.iter().map(|s| s.block.title.as_str()).collect();
        assert_eq!(titles, vec!["Pipelines"]);
    }

    #[test]
    fn test_heuristic_empty_when_nothing_overlaps() {
        let job = JobRecord {
            id: 3,
            role: Some("Florist".into()),
            ..Default::default()
        };
        assert!(HeuristicSelector::select_sync(&job, &library(), 5).is_empty());
    }

    #[test]
    fn test_pick_blocks_by_ids_keeps_library_order() {
        let picked = pick_blocks_by_ids("```json\n[3, 1, 99]\n```", &ml_job(), &library(), 5).unwrap();
        let ids: Vec<Option<i64>> = picked.iter().map(|s| s.block.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
        assert!(picked[0].score > 0.0, "LLM picks keep their heuristic score");

        let capped = pick_blocks_by_ids("[1, 2, 3]", &ml_job(), &library(), 2).unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[test]
    fn test_pick_blocks_by_ids_rejects_unusable_answers() {
        for answer in ["I cannot decide", "[\"a\", \"b\"]", "[98, 99]"] {
            let result = pick_blocks_by_ids(answer, &ml_job(), &library(), 3);
            assert!(matches!(result, Err(AppError::Llm(_))), "{answer}");
        }
    }

    #[tokio::test]
    async fn test_fallback_selector_uses_heuristic_on_error() {
        let selector = FallbackSelector::new(Arc::new(FailingSelector));
        let selected = selector.select(&ml_job(), &library(), 1).await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].block.title, "Recommendations");
    }

    #[tokio::test]
    async fn test_select_for_unknown_job_is_not_found() {
        let jobs = MemoryJobRepository::default();
        let blocks = MemoryBlockRepository::with_blocks(library());
        let result = select_blocks_for_job(&jobs, &blocks, &HeuristicSelector, 404, 3).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_select_with_empty_library_is_empty() {
        let jobs = MemoryJobRepository::with_jobs(vec![ml_job()]);
        let blocks = MemoryBlockRepository::default();
        let (job, selected) = select_blocks_for_job(&jobs, &blocks, &HeuristicSelector, 9, 3)
            .await
            .unwrap();
        assert_eq!(job.id, 9);
        assert!(selected.is_empty());
    }

    #[tokio::test]
    async fn test_select_for_job_end_to_end() {
        let jobs = MemoryJobRepository::with_jobs(vec![ml_job()]);
        let blocks = MemoryBlockRepository::with_blocks(library());
        let (_, selected) = select_blocks_for_job(&jobs, &blocks, &HeuristicSelector, 9, 6)
            .await
            .unwrap();
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].block.title, "Recommendations");
    }
}
