//! Document content API endpoint.
//!
//! Returns the markdown source of a documentation page together with the
//! resolved version and the repository path it was read from.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::error::DocError;
use crate::handlers::{DocPath, ResponseMeta};
use crate::resolver::{DocPayload, split_docs_path};
use crate::state::AppState;

/// Success envelope for GET /api/content/{product}/doc/{version}/{path}.
#[derive(Debug, Serialize)]
pub struct DocResponse {
    meta: ResponseMeta,
    result: DocPayload,
}

impl DocResponse {
    /// Wrap a resolved document in a 200 envelope.
    #[must_use]
    pub fn ok(result: DocPayload) -> Self {
        Self {
            meta: ResponseMeta::new(StatusCode::OK),
            result,
        }
    }
}

/// Handle GET /api/content/{product}/doc/{version} (docs root).
pub(crate) async fn get_doc_root(
    DocPath((product, version)): DocPath<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocResponse>, DocError> {
    get_doc_impl(&state, &product, &version, &[])
}

/// Handle GET /api/content/{product}/doc/{version}/{path}.
pub(crate) async fn get_doc(
    DocPath((product, version, docs_path)): DocPath<(String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocResponse>, DocError> {
    get_doc_impl(&state, &product, &version, &split_docs_path(&docs_path))
}

fn get_doc_impl(
    state: &AppState,
    product: &str,
    version: &str,
    docs_path: &[String],
) -> Result<Json<DocResponse>, DocError> {
    let payload = state.resolver.resolve(product, version, docs_path)?;
    Ok(Json(DocResponse::ok(payload)))
}
