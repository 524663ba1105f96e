//! Relevance scoring: a deterministic weighted heuristic over a block and a
//! job's requirement vector.
//!
//! Per block, accumulated additively:
//!   requirement phrase   +3.0 in content, else +2.0 in title, else +1.5 in a keyword
//!   required skill       +2.5 in a block skill, else +1.5 in content
//!   preferred role       +2.0 on exact role_types membership
//!   strength             +2.0 essential, +1.0 strong, +0.5 good
//!   density              +0.5 per requirement phrase found in content
//!
//! All text comparisons are case-insensitive substring checks unless noted.

use serde::Serialize;

use crate::blocks::models::Block;
use crate::jobs::requirements::JobRequirementVector;

const CONTENT_MATCH: f64 = 3.0;
const TITLE_MATCH: f64 = 2.0;
const KEYWORD_MATCH: f64 = 1.5;
const SKILL_MATCH: f64 = 2.5;
const SKILL_IN_CONTENT: f64 = 1.5;
const ROLE_MATCH: f64 = 2.0;
const DENSITY_PER_PHRASE: f64 = 0.5;

/// Display scale: raw × 10, capped at 100.
const DISPLAY_SCALE: f64 = 10.0;
const DISPLAY_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RelevanceBreakdown {
    pub requirement_points: f64,
    pub skill_points: f64,
    pub role_points: f64,
    pub strength_bonus: f64,
    pub density_bonus: f64,
}

impl RelevanceBreakdown {
    pub fn score(&self) -> f64 {
        self.requirement_points
            + self.skill_points
            + self.role_points
            + self.strength_bonus
            + self.density_bonus
    }

    /// Everything except the strength bonus: non-zero only when the block
    /// shares some text or role with the job.
    pub fn match_points(&self) -> f64 {
        self.score() - self.strength_bonus
    }
}

/// A block paired with its relevance.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBlock<'a> {
    pub block: &'a Block,
    pub breakdown: RelevanceBreakdown,
}

impl ScoredBlock<'_> {
    pub fn score(&self) -> f64 {
        self.breakdown.score()
    }
}

pub fn score_block(block: &Block, job: &JobRequirementVector) -> RelevanceBreakdown {
    let content = block.content.to_lowercase();
    let title = block.title.to_lowercase();
    let keywords: Vec<String> = block.keywords.iter().map(|k| k.to_lowercase()).collect();
    let skills: Vec<String> = block.skills.iter().map(|s| s.to_lowercase()).collect();

    let mut breakdown = RelevanceBreakdown::default();
    let mut phrases_in_content = 0usize;

    for requirement in &job.requirements {
        let requirement = requirement.to_lowercase();
        if content.contains(&requirement) {
            breakdown.requirement_points += CONTENT_MATCH;
            phrases_in_content += 1;
        } else if title.contains(&requirement) {
            breakdown.requirement_points += TITLE_MATCH;
        } else if keywords.iter().any(|k| k.contains(&requirement)) {
            breakdown.requirement_points += KEYWORD_MATCH;
        }
    }

    for skill in &job.required_skills {
        let skill = skill.to_lowercase();
        if skills.iter().any(|s| s.contains(&skill)) {
            breakdown.skill_points += SKILL_MATCH;
        } else if content.contains(&skill) {
            breakdown.skill_points += SKILL_IN_CONTENT;
        }
    }

    if let Some(role) = &job.preferred_role {
        if block.role_types.iter().any(|r| r == role) {
            breakdown.role_points = ROLE_MATCH;
        }
    }

    breakdown.strength_bonus = block.strength_level.ranking_bonus();
    // Reinforces the content tier above; both contributions apply.
    breakdown.density_bonus = DENSITY_PER_PHRASE * phrases_in_content as f64;

    breakdown
}

/// Scores every block and sorts by score descending. Ties keep input order.
pub fn rank<'a>(blocks: &'a [Block], job: &JobRequirementVector) -> Vec<ScoredBlock<'a>> {
    let mut scored: Vec<ScoredBlock<'a>> = blocks
        .iter()
        .map(|block| ScoredBlock {
            block,
            breakdown: score_block(block, job),
        })
        .collect();

    // `sort_by` is stable.
    scored.sort_by(|a, b| b.score().total_cmp(&a.score()));
    scored
}

pub fn normalize(raw: f64) -> f64 {
    (raw * DISPLAY_SCALE).min(DISPLAY_MAX)
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockSuggestion {
    pub block_id: Option<i64>,
    pub block: Block,
    pub relevance_score: f64,
    pub breakdown: RelevanceBreakdown,
}

/// Ranked blocks with display-normalized scores.
pub fn rank_report(blocks: &[Block], job: &JobRequirementVector) -> Vec<BlockSuggestion> {
    rank(blocks, job)
        .into_iter()
        .map(|scored| BlockSuggestion {
            block_id: scored.block.id,
            block: scored.block.clone(),
            relevance_score: normalize(scored.score()),
            breakdown: scored.breakdown,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::classify::classify;
    use crate::blocks::models::StrengthLevel;

    fn block(title: &str, content: &str) -> Block {
        Block {
            id: None,
            category: "TEST".into(),
            subcategory: None,
            title: title.into(),
            content: content.into(),
            skills: vec![],
            keywords: vec![],
            strength_level: StrengthLevel::Good,
            role_types: vec![],
            company_types: vec![],
        }
    }

    fn requirements(phrases: &[&str]) -> JobRequirementVector {
        JobRequirementVector {
            requirements: phrases.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_content_and_title_match_counts_once() {
        let b = block("Kafka migration", "Led the Kafka migration for payments");
        let breakdown = score_block(&b, &requirements(&["kafka migration"]));
        assert_eq!(breakdown.requirement_points, 3.0);
    }

    #[test]
    fn test_requirement_tiers() {
        let mut b = block("Search relevance", "Improved ranking quality");
        b.keywords = vec!["Elasticsearch".into()];

        let title_only = score_block(&b, &requirements(&["relevance"]));
        assert_eq!(title_only.requirement_points, 2.0);
        assert_eq!(title_only.density_bonus, 0.0);

        let keyword_only = score_block(&b, &requirements(&["elastic"]));
        assert_eq!(keyword_only.requirement_points, 1.5);

        let none = score_block(&b, &requirements(&["fortran"]));
        assert_eq!(none.requirement_points, 0.0);
    }

    #[test]
    fn test_density_bonus_reinforces_content_matches() {
        let b = block("Pipelines", "Built streaming pipelines on Spark with exactly-once delivery");
        let breakdown = score_block(&b, &requirements(&["spark", "streaming", "exactly-once"]));
        assert_eq!(breakdown.requirement_points, 9.0);
        assert_eq!(breakdown.density_bonus, 1.5, "0.5 per content phrase, on top of +3.0 each");
        assert_eq!(breakdown.score(), 9.0 + 1.5 + 0.5);
    }

    #[test]
    fn test_skill_tiers() {
        let mut b = block("API", "Wrote the billing service in Go");
        b.skills = vec!["Distributed Systems".into()];
        let job = JobRequirementVector {
            required_skills: vec!["distributed".into(), "go".into(), "haskell".into()],
            ..Default::default()
        };
        assert_eq!(score_block(&b, &job).skill_points, 2.5 + 1.5);
    }

    #[test]
    fn test_preferred_role_is_exact_membership() {
        let mut b = block("Platform", "Ran the platform");
        b.role_types = vec!["ML Engineer".into()];

        let exact = JobRequirementVector {
            preferred_role: Some("ML Engineer".into()),
            ..Default::default()
        };
        assert_eq!(score_block(&b, &exact).role_points, 2.0);

        let partial = JobRequirementVector {
            preferred_role: Some("ML".into()),
            ..Default::default()
        };
        assert_eq!(score_block(&b, &partial).role_points, 0.0);
    }

    #[test]
    fn test_strength_bonus_is_not_match() {
        let mut b = block("Anything", "Unrelated");
        b.strength_level = StrengthLevel::Essential;
        let breakdown = score_block(&b, &requirements(&["rust"]));
        assert_eq!(breakdown.score(), 2.0);
        assert_eq!(breakdown.match_points(), 0.0);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let blocks = vec![
            block("first", "alpha"),
            block("second", "beta"),
            block("third", "alpha"),
        ];
        let ranked = rank(&blocks, &requirements(&["alpha"]));
        let titles: Vec<&str> = ranked.iter().map(|s| s.block.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third", "second"]);

        let no_match = rank(&blocks, &requirements(&["zeta"]));
        let titles: Vec<&str> = no_match.iter().map(|s| s.block.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_rank_empty_universe() {
        assert!(rank(&[], &requirements(&["anything"])).is_empty());
        assert!(rank_report(&[], &JobRequirementVector::default()).is_empty());
    }

    #[test]
    fn test_normalize_caps_at_hundred() {
        assert_eq!(normalize(0.5), 5.0);
        assert_eq!(normalize(7.5), 75.0);
        assert_eq!(normalize(42.0), 100.0);
    }

    #[test]
    fn test_rank_report_uses_normalized_scores() {
        let blocks = vec![classify(
            "SCALE & PERFORMANCE",
            None,
            "Latency",
            "Cut checkout latency by 40%",
        )];
        let report = rank_report(&blocks, &requirements(&["latency"]));
        // 3.0 content + 0.5 density + 0.5 good
        assert_eq!(report[0].relevance_score, 40.0);
    }

    #[test]
    fn test_scoring_is_pure() {
        let b = block("Cache", "Designed a write-through cache");
        let job = requirements(&["cache", "write-through"]);
        assert_eq!(score_block(&b, &job), score_block(&b, &job));
    }
}
