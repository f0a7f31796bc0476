//! Error types for document resolution.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docport_meta::FrontMatterError;
use docport_versions::VersionError;
use serde::Serialize;

use crate::handlers::ResponseMeta;

/// Client-visible message for every resolution failure.
pub(crate) const NOT_FOUND_MESSAGE: &str = "Not found";

/// Document resolution error.
///
/// The `Display` output is the server-side diagnostic. Clients only ever see
/// a generic 404 body, whatever the variant.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// Product slug is not in the registry.
    #[error("Product, {0}, not found")]
    UnknownProduct(String),

    /// Version could not be resolved for the product.
    #[error("{0}")]
    Version(#[from] VersionError),

    /// Neither candidate path could be read.
    #[error("No content found at {}", .candidates.join(" or "))]
    ContentNotFound {
        /// Candidate paths in lookup order.
        candidates: Vec<String>,
    },

    /// Content was found but its front matter is malformed.
    #[error("Failed to parse markdown front matter: {0}")]
    FrontMatter(#[from] FrontMatterError),

    /// Request path parameters could not be extracted.
    #[error("Invalid request path: {0}")]
    InvalidPath(String),
}

impl From<PathRejection> for DocError {
    /// Rejections never reach `DocResolver::resolve`, so they are logged here.
    fn from(rejection: PathRejection) -> Self {
        let err = Self::InvalidPath(rejection.body_text());
        tracing::error!("{err}");
        err
    }
}

/// Body of a 404 response.
#[derive(Debug, Serialize)]
struct NotFoundBody {
    meta: ResponseMeta,
    error: &'static str,
}

impl IntoResponse for DocError {
    fn into_response(self) -> Response {
        let body = NotFoundBody {
            meta: ResponseMeta::new(StatusCode::NOT_FOUND),
            error: NOT_FOUND_MESSAGE,
        };

        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_product_message() {
        let err = DocError::UnknownProduct("fake product".to_owned());

        assert_eq!(err.to_string(), "Product, fake product, not found");
    }

    #[test]
    fn test_version_message_is_passed_through() {
        let err = DocError::from(VersionError::NotFound {
            product: "vault".to_owned(),
            version: "v0.0.x".to_owned(),
        });

        assert_eq!(err.to_string(), "Product, vault, has no \"v0.0.x\" version");
    }

    #[test]
    fn test_content_not_found_lists_candidates() {
        let err = DocError::ContentNotFound {
            candidates: vec!["content/a.mdx".to_owned(), "content/a/index.mdx".to_owned()],
        };

        assert_eq!(
            err.to_string(),
            "No content found at content/a.mdx or content/a/index.mdx"
        );
    }

    #[test]
    fn test_front_matter_message() {
        let err = DocError::from(FrontMatterError::Unterminated);

        assert!(
            err.to_string()
                .to_lowercase()
                .starts_with("failed to parse markdown")
        );
    }

    #[test]
    fn test_every_variant_is_404() {
        let errors = [
            DocError::UnknownProduct("x".to_owned()),
            DocError::from(VersionError::Malformed("x".to_owned())),
            DocError::ContentNotFound { candidates: vec![] },
            DocError::from(FrontMatterError::Unterminated),
            DocError::InvalidPath("x".to_owned()),
        ];

        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        }
    }
}
