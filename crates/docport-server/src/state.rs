//! Application state.
//!
//! Shared state for all request handlers.

use crate::resolver::DocResolver;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Document resolver.
    pub(crate) resolver: DocResolver,
}
