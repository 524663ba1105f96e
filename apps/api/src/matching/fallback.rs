//! Secondary keyword-overlap scorer, used only when no block shares any text
//! or role with the job under the primary relevance formula.
//!
//! Job keywords are the lowercased skills, requirement phrases and role-title
//! words. Per block: +3 per block skill that is a job keyword, +2 per block
//! keyword that is a job keyword, +1 per job keyword found in title + content.
//! No role or strength bonuses.

use crate::blocks::models::Block;
use crate::jobs::models::JobRecord;

const SKILL_HIT: u32 = 3;
const KEYWORD_HIT: u32 = 2;
const TEXT_HIT: u32 = 1;

/// Deduplicated job keywords in first-seen order.
pub fn job_keywords(job: &JobRecord) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let candidates = job
        .skills()
        .iter()
        .chain(job.requirements())
        .map(|s| s.to_lowercase())
        .chain(job.role_title().split_whitespace().map(str::to_lowercase));

    for candidate in candidates {
        if !candidate.is_empty() && !keywords.contains(&candidate) {
            keywords.push(candidate);
        }
    }
    keywords
}

pub fn overlap_score(block: &Block, keywords: &[String]) -> u32 {
    let is_keyword = |value: &String| keywords.contains(&value.to_lowercase());
    let text = format!("{} {}", block.title, block.content).to_lowercase();

    let skill_hits = block.skills.iter().filter(|s| is_keyword(*s)).count() as u32;
    let keyword_hits = block.keywords.iter().filter(|k| is_keyword(*k)).count() as u32;
    let text_hits = keywords.iter().filter(|k| text.contains(k.as_str())).count() as u32;

    skill_hits * SKILL_HIT + keyword_hits * KEYWORD_HIT + text_hits * TEXT_HIT
}

/// Blocks with a positive overlap, best first (ties keep input order),
/// truncated to `max_blocks`.
pub fn select_by_overlap<'a>(
    job: &JobRecord,
    blocks: &'a [Block],
    max_blocks: usize,
) -> Vec<(&'a Block, u32)> {
    let keywords = job_keywords(job);
    let mut scored: Vec<(&Block, u32)> = blocks
        .iter()
        .map(|b| (b, overlap_score(b, &keywords)))
        .filter(|(_, score)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(max_blocks);
    scored
}
