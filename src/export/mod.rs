// src/export/mod.rs
// =============================================================================
// Saving articles to disk.
//
// One page in, one directory out: <root>/<title>/<title>.html plus the
// page's images when they were requested.
// =============================================================================

mod page;

pub use page::{ExportOptions, PageExporter, PageReport};
