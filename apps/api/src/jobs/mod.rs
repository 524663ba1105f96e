// Job records as the matching engine sees them: persisted row, derived
// requirement vector, and cheap text/date signals.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod requirements;
pub mod signals;
