// Achievement block library: outline ingestion, derived classification,
// in-memory store and the persistence seam.
// Derived fields are computed once at ingestion and are a pure function of
// (category, title, content).

pub mod classify;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod repository;
pub mod store;
pub mod tables;
