// src/wiki/mod.rs
// =============================================================================
// This module talks to the MediaWiki API.
//
// Currently implements:
// - Fetching the rendered HTML of a page (action=parse)
// - Per-language endpoints (en.wikipedia.org, de.wikipedia.org, ...)
// =============================================================================

mod fetch;

pub use fetch::{WikiClient, API_USER_AGENT, DEFAULT_API_TEMPLATE};
