//! Persistence seam for blocks.
//!
//! The core only talks to `BlockRepository`; `PgBlockRepository` is the
//! Postgres implementation used by the HTTP layer.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};

use crate::blocks::models::{Block, StrengthLevel};
use crate::errors::AppError;

#[async_trait]
pub trait BlockRepository: Send + Sync {
    async fn find_block_by_title(
        &self,
        category: &str,
        title: &str,
    ) -> Result<Option<Block>, AppError>;

    /// Inserts a block and returns its assigned id.
    async fn save(&self, block: &Block) -> Result<i64, AppError>;

    /// All blocks in insertion order.
    async fn list_all_blocks(&self) -> Result<Vec<Block>, AppError>;

    async fn find_block(&self, id: i64) -> Result<Option<Block>, AppError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Lookup-before-insert on (category, title). Existing blocks are left as-is.
pub async fn import_blocks(
    repo: &dyn BlockRepository,
    blocks: &[Block],
) -> Result<ImportSummary, AppError> {
    let mut summary = ImportSummary::default();

    for block in blocks {
        let (category, title) = block.natural_key();
        if repo.find_block_by_title(category, title).await?.is_some() {
            warn!("Block '{title}' already exists in '{category}', skipping");
            summary.skipped += 1;
            continue;
        }
        repo.save(block).await?;
        summary.imported += 1;
    }

    info!(
        "Block import finished: {} imported, {} skipped",
        summary.imported, summary.skipped
    );
    Ok(summary)
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, FromRow)]
struct BlockRow {
    id: i64,
    category: String,
    subcategory: Option<String>,
    title: String,
    content: String,
    skills: Vec<String>,
    keywords: Vec<String>,
    strength_level: String,
    role_types: Vec<String>,
    company_types: Vec<String>,
}

impl From<BlockRow> for Block {
    fn from(row: BlockRow) -> Self {
        let strength_level = row.strength_level.parse().unwrap_or_else(|e| {
            warn!("Block {} has {e}; treating as good", row.id);
            StrengthLevel::Good
        });
        Block {
            id: Some(row.id),
            category: row.category,
            subcategory: row.subcategory,
            title: row.title,
            content: row.content,
            skills: row.skills,
            keywords: row.keywords,
            strength_level,
            role_types: row.role_types,
            company_types: row.company_types,
        }
    }
}

const BLOCK_COLUMNS: &str = "id, category, subcategory, title, content, skills, keywords, \
                             strength_level, role_types, company_types";

#[derive(Clone)]
pub struct PgBlockRepository {
    pool: PgPool,
}

impl PgBlockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockRepository for PgBlockRepository {
    async fn find_block_by_title(
        &self,
        category: &str,
        title: &str,
    ) -> Result<Option<Block>, AppError> {
        let row: Option<BlockRow> = sqlx::query_as(&format!(
            "SELECT {BLOCK_COLUMNS} FROM lego_blocks WHERE category = $1 AND title = $2 LIMIT 1"
        ))
        .bind(category)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Block::from))
    }

    async fn save(&self, block: &Block) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO lego_blocks
                (category, subcategory, title, content, skills, keywords,
                 strength_level, role_types, company_types)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&block.category)
        .bind(&block.subcategory)
        .bind(&block.title)
        .bind(&block.content)
        .bind(&block.skills)
        .bind(&block.keywords)
        .bind(block.strength_level.as_str())
        .bind(&block.role_types)
        .bind(&block.company_types)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_all_blocks(&self) -> Result<Vec<Block>, AppError> {
        let rows: Vec<BlockRow> =
            sqlx::query_as(&format!("SELECT {BLOCK_COLUMNS} FROM lego_blocks ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Block::from).collect())
    }

    async fn find_block(&self, id: i64) -> Result<Option<Block>, AppError> {
        let row: Option<BlockRow> =
            sqlx::query_as(&format!("SELECT {BLOCK_COLUMNS} FROM lego_blocks WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Block::from))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemoryBlockRepository {
    blocks: std::sync::Mutex<Vec<Block>>,
}

#[cfg(test)]
impl MemoryBlockRepository {
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        let repo = Self::default();
        for (i, mut block) in blocks.into_iter().enumerate() {
            block.id = Some(i as i64 + 1);
            repo.blocks.lock().unwrap().push(block);
        }
        repo
    }
}

#[cfg(test)]
#[async_trait]
impl BlockRepository for MemoryBlockRepository {
    async fn find_block_by_title(
        &self,
        category: &str,
        title: &str,
    ) -> Result<Option<Block>, AppError> {
        let blocks = self.blocks.lock().unwrap();
        Ok(blocks
            .iter()
            .find(|b| b.natural_key() == (category, title))
            .cloned())
    }

    async fn save(&self, block: &Block) -> Result<i64, AppError> {
        let mut blocks = self.blocks.lock().unwrap();
        let id = blocks.len() as i64 + 1;
        let mut stored = block.clone();
        stored.id = Some(id);
        blocks.push(stored);
        Ok(id)
    }

    async fn list_all_blocks(&self) -> Result<Vec<Block>, AppError> {
        Ok(self.blocks.lock().unwrap().clone())
    }

    async fn find_block(&self, id: i64) -> Result<Option<Block>, AppError> {
        let blocks = self.blocks.lock().unwrap();
        Ok(blocks.iter().find(|b| b.id == Some(id)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::classify::classify;

    fn sample() -> Vec<Block> {
        vec![
            classify("SCALE & PERFORMANCE", None, "Cache layer", "Cut p99 latency 60%"),
            classify("SCALE & PERFORMANCE", None, "Sharding", "Sharded 3 databases"),
        ]
    }

    #[tokio::test]
    async fn test_import_then_reimport_skips_all() {
        let repo = MemoryBlockRepository::default();

        let first = import_blocks(&repo, &sample()).await.unwrap();
        assert_eq!(first, ImportSummary { imported: 2, skipped: 0 });

        let second = import_blocks(&repo, &sample()).await.unwrap();
        assert_eq!(second, ImportSummary { imported: 0, skipped: 2 });
        assert_eq!(repo.list_all_blocks().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_same_title_in_other_category_is_imported() {
        let repo = MemoryBlockRepository::with_blocks(sample());
        let other = classify("DEVOPS & OPERATIONAL EXCELLENCE", None, "Cache layer", "Ran it");

        let summary = import_blocks(&repo, &[other]).await.unwrap();
        assert_eq!(summary.imported, 1);
    }

    #[tokio::test]
    async fn test_saved_blocks_get_ids() {
        let repo = MemoryBlockRepository::default();
        import_blocks(&repo, &sample()).await.unwrap();

        let block = repo.find_block(2).await.unwrap().unwrap();
        assert_eq!(block.title, "Sharding");
        assert!(repo.find_block(99).await.unwrap().is_none());
    }

    #[test]
    fn test_row_with_unknown_strength_falls_back_to_good() {
        let row = BlockRow {
            id: 7,
            category: "SCALE & PERFORMANCE".into(),
            subcategory: None,
            title: "Legacy".into(),
            content: "Imported by hand".into(),
            skills: vec![],
            keywords: vec![],
            strength_level: "legendary".into(),
            role_types: vec![],
            company_types: vec![],
        };
        let block = Block::from(row);
        assert_eq!(block.id, Some(7));
        assert_eq!(block.strength_level, StrengthLevel::Good);
    }
}
