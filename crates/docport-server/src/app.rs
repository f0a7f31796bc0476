//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/content/{product}/doc/{version}",
            get(handlers::content::get_doc_root),
        )
        .route(
            "/api/content/{product}/doc/{version}/",
            get(handlers::content::get_doc_root),
        )
        .route(
            "/api/content/{product}/doc/{version}/{*docs_path}",
            get(handlers::content::get_doc),
        );

    security::with_security_headers(Router::new().merge(api_routes)).with_state(state)
}
