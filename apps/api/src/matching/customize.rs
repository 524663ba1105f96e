use tracing::warn;

use crate::blocks::models::Block;
use crate::jobs::models::JobRecord;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::LlmClient;
use crate::matching::prompts::customize_prompt;

/// One-line job description used as tailoring context.
pub fn job_context_for(job: &JobRecord) -> String {
    let mut context = match (job.role_title(), job.company.as_deref()) {
        ("", Some(company)) => format!("Role at {company}"),
        ("", None) => "Software role".to_string(),
        (role, Some(company)) => format!("{role} at {company}"),
        (role, None) => role.to_string(),
    };
    if !job.requirements().is_empty() {
        context.push_str(&format!(". Requirements: {}", job.requirements().join(", ")));
    }
    if !job.skills().is_empty() {
        context.push_str(&format!(". Skills: {}", job.skills().join(", ")));
    }
    context
}

/// Returns a tailored copy of the block's content for `job_context`.
///
/// The block itself is never modified. Without an LLM client, or when the call
/// fails, the original content is returned unchanged.
pub async fn customize_block(llm: Option<&LlmClient>, block: &Block, job_context: &str) -> String {
    let Some(llm) = llm else {
        return block.content.clone();
    };

    let prompt = customize_prompt(job_context, &block.content);
    match llm.call_text(&prompt, PLAIN_TEXT_SYSTEM).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Block customization failed for '{}': {e}", block.title);
            block.content.clone()
        }
    }
}
