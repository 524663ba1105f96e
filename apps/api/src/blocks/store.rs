use std::collections::HashMap;

use serde::Serialize;

use crate::blocks::models::{Block, StrengthLevel};

/// Read-only, in-memory view over a loaded block library.
///
/// The store never enforces title uniqueness; duplicates are filtered by the
/// import policy before blocks reach persistence.
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

/// Search criteria. Every populated field narrows the result.
#[derive(Debug, Clone, Default)]
pub struct BlockFilter {
    /// Case-insensitive substring of the category name.
    pub category: Option<String>,
    /// Exact role type membership.
    pub role_type: Option<String>,
    /// Any of these, case-insensitive equality against block skills.
    pub skills: Vec<String>,
    /// Any of these, substring of content or of the joined keyword list.
    pub keywords: Vec<String>,
    pub min_strength: Option<StrengthLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStats {
    pub total_blocks: usize,
    pub categories: Vec<CountEntry>,
    pub strength_levels: Vec<CountEntry>,
    pub top_skills: Vec<CountEntry>,
    pub top_role_types: Vec<CountEntry>,
}

const TOP_N: usize = 10;

impl BlockStore {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn search(&self, filter: &BlockFilter) -> Vec<&Block> {
        let category = filter.category.as_ref().map(|c| c.to_lowercase());
        let skills: Vec<String> = filter.skills.iter().map(|s| s.to_lowercase()).collect();
        let keywords: Vec<String> = filter.keywords.iter().map(|k| k.to_lowercase()).collect();

        self.blocks
            .iter()
            .filter(|b| {
                category
                    .as_ref()
                    .map_or(true, |c| b.category.to_lowercase().contains(c.as_str()))
            })
            .filter(|b| {
                filter
                    .role_type
                    .as_ref()
                    .map_or(true, |r| b.role_types.iter().any(|t| t == r))
            })
            .filter(|b| {
                skills.is_empty()
                    || b
                        .skills
                        .iter()
                        .any(|s| skills.contains(&s.to_lowercase()))
            })
            .filter(|b| {
                if keywords.is_empty() {
                    return true;
                }
                let content = b.content.to_lowercase();
                let joined = b.keywords.join(" ").to_lowercase();
                keywords
                    .iter()
                    .any(|k| content.contains(k.as_str()) || joined.contains(k.as_str()))
            })
            .filter(|b| filter.min_strength.map_or(true, |min| b.strength_level >= min))
            .collect()
    }

    /// Blocks grouped by category, groups in first-seen order.
    pub fn by_category(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for block in &self.blocks {
            match groups.iter_mut().find(|g| g.category == block.category) {
                Some(group) => group.blocks.push(block.clone()),
                None => groups.push(CategoryGroup {
                    category: block.category.clone(),
                    blocks: vec![block.clone()],
                }),
            }
        }
        groups
    }

    pub fn summary_stats(&self) -> BlockStats {
        let strength_levels = [
            StrengthLevel::Essential,
            StrengthLevel::Strong,
            StrengthLevel::Good,
        ]
        .iter()
        .map(|level| CountEntry {
            name: level.to_string(),
            count: self.blocks.iter().filter(|b| b.strength_level == *level).count(),
        })
        .collect();

        BlockStats {
            total_blocks: self.blocks.len(),
            categories: count_ordered(self.blocks.iter().map(|b| b.category.as_str()), None),
            strength_levels,
            top_skills: count_ordered(
                self.blocks.iter().flat_map(|b| b.skills.iter().map(String::as_str)),
                Some(TOP_N),
            ),
            top_role_types: count_ordered(
                self.blocks
                    .iter()
                    .flat_map(|b| b.role_types.iter().map(String::as_str)),
                Some(TOP_N),
            ),
        }
    }
}

/// Counts occurrences, sorted by count descending with ties in first-seen order.
fn count_ordered<'a>(values: impl Iterator<Item = &'a str>, limit: Option<usize>) -> Vec<CountEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut entries: Vec<CountEntry> = order
        .into_iter()
        .map(|name| CountEntry {
            name: name.to_string(),
            count: counts[name],
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}
