// src/images/mod.rs
// =============================================================================
// Everything to do with article images.
//
// Submodules:
// - locate: finds image references (infobox, gallery, any <img>)
// - fetch: downloads one image with a browser-like User-Agent
// - rewrite: names saved files, rewrites <img> tags, or strips them
// =============================================================================

mod fetch;
mod locate;
mod rewrite;

pub use fetch::{ImageFetcher, BROWSER_USER_AGENT, DEFAULT_IMAGE_ORIGIN};
pub use locate::locate_images;
pub use rewrite::{download_images, rewrite_image_sources, strip_images};
