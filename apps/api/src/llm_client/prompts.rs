// Shared prompt fragments. Each module that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt for calls whose answer must be a bare JSON value.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text rewriting calls.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert CV editor. \
    Respond with the requested text only, with no preamble, quotes or explanation.";
