// Relevance engine: scores blocks against a job's requirement vector, ranks
// them, and selects a bounded top-N through a pluggable selector.
// Scoring is pure and synchronous; only the LLM selector performs I/O.

pub mod customize;
pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod relevance;
pub mod selector;
