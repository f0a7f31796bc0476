//! HTTP request handlers.

pub(crate) mod content;

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use serde::Serialize;

use crate::error::DocError;

/// `meta` block shared by success and error envelopes.
#[derive(Debug, Serialize)]
pub(crate) struct ResponseMeta {
    status_code: u16,
}

impl ResponseMeta {
    pub(crate) fn new(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
        }
    }
}

/// Path parameters whose rejections surface as [`DocError`].
///
/// Keeps malformed URLs (e.g. invalid percent-encoded UTF-8) on the generic
/// 404 path instead of axum's default 400 body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(DocError))]
pub(crate) struct DocPath<T>(pub(crate) T);
