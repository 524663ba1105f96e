// Prompt builders for LLM block selection and block tailoring.
// Reuses the JSON-only and plain-text system prompts from llm_client::prompts.

use serde_json::json;

use crate::blocks::models::Block;
use crate::jobs::models::JobRecord;
use crate::jobs::signals::experience_level_for;

/// Block content is truncated to this many characters in selection prompts.
const CONTENT_PREVIEW_CHARS: usize = 200;

fn preview(content: &str) -> String {
    content.chars().take(CONTENT_PREVIEW_CHARS).collect()
}

pub fn block_selection_prompt(job: &JobRecord, blocks: &[Block], max_blocks: usize) -> String {
    let job_context = json!({
        "role": job.role,
        "company": job.company,
        "skills": job.skills(),
        "requirements": job.requirements(),
        "responsibilities": job.responsibilities(),
        "experience_level": experience_level_for(job).as_str(),
    });

    let blocks_data: Vec<_> = blocks
        .iter()
        .map(|b| {
            json!({
                "id": b.id,
                "title": b.title,
                "category": b.category,
                "content": preview(&b.content),
                "skills": b.skills,
                "keywords": b.keywords,
            })
        })
        .collect();

    format!(
        "Given a job posting and a library of CV achievement statements, select the \
{max_blocks} most relevant blocks that best demonstrate the candidate's fit for the role.

Job Context:
{job}

Available CV Blocks:
{blocks}

Select the {max_blocks} most relevant block IDs that:
1. Match the required skills and technologies
2. Demonstrate relevant experience level
3. Show achievements related to the job responsibilities
4. Provide diverse evidence across different competency areas

Respond with ONLY a JSON array of block IDs, e.g.: [1, 5, 8, 12, 15, 20]",
        job = serde_json::to_string_pretty(&job_context).unwrap_or_default(),
        blocks = serde_json::to_string_pretty(&blocks_data).unwrap_or_default(),
    )
}

pub fn customize_prompt(job_context: &str, content: &str) -> String {
    format!(
        "Tailor this CV achievement statement for the following job context.
Keep the same core achievement but adjust language and emphasis to better fit the role.
Maintain the same length and format.

Job Context: {job_context}

Original Statement:
{content}

Provide ONLY the tailored version, no explanation."
    )
}
