pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::blocks::handlers as blocks;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::tax::handlers as tax;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Salary and budget
        .route("/calculate-salary", post(tax::handle_calculate_salary))
        .route("/budget", post(tax::handle_budget))
        // Lego block library
        .route("/lego-blocks", get(blocks::handle_list_blocks))
        .route("/lego-blocks/stats", get(blocks::handle_block_stats))
        .route("/lego-blocks/import", post(blocks::handle_import_blocks))
        .route(
            "/lego-blocks/:id/customize",
            post(blocks::handle_customize_block),
        )
        // Per-job matching and tracking
        .route(
            "/jobs/:id/cv-suggestions",
            get(matching::handle_cv_suggestions),
        )
        .route("/jobs/:id/generate-cv", post(matching::handle_generate_cv))
        .route("/jobs/:id/staleness", get(jobs::handle_staleness))
        .with_state(state)
}
