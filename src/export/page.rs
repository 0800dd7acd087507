// src/export/page.rs
// =============================================================================
// Writes one article to disk.
//
// Layout produced for title "C/C++" with images:
//   <output root>/C_C__/C_C__.html
//   <output root>/C_C__/220px-C_logo.png
//   <output root>/C_C__/...
//
// The HTML is parsed once here and handed by reference to the locator and
// the rewriter, then serialized. A page with no images to rewrite is
// written exactly as fetched.
// =============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::MultiProgress;

use crate::document::ArticleDocument;
use crate::images::{
    download_images, locate_images, rewrite_image_sources, strip_images, ImageFetcher,
};
use crate::progress;
use crate::sanitize::sanitize_title;

/// Settings shared by every page of a run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory that receives one subdirectory per page
    pub output_root: PathBuf,
    /// Download images and point the HTML at them; otherwise strip <img>
    pub include_images: bool,
    /// Draw progress bars for pages and image downloads
    pub show_progress: bool,
}

/// What happened while exporting one page
#[derive(Debug, Default)]
pub struct PageReport {
    /// Absolute path of the written HTML file
    pub html_path: PathBuf,
    /// References found by the locator (duplicates included)
    pub located: usize,
    pub saved: usize,
    pub skipped: usize,
    /// <img> elements removed because images were excluded
    pub stripped: usize,
}

pub struct PageExporter {
    fetcher: ImageFetcher,
    options: ExportOptions,
    bars: MultiProgress,
}

impl PageExporter {
    pub fn new(fetcher: ImageFetcher, options: ExportOptions) -> Self {
        let bars = progress::bar_group(options.show_progress);
        Self {
            fetcher,
            options,
            bars,
        }
    }

    // The run's progress bars; the page loop adds its own bar here so the
    // image bars stack underneath it
    pub fn progress(&self) -> &MultiProgress {
        &self.bars
    }

    // Exports one page whose HTML has already been fetched
    //
    // The caller makes sure `content` is a real page; a missing page is
    // never passed in here.
    //
    // Errors: only filesystem failures (directory, rename, write).
    pub async fn export(&self, title: &str, content: &str) -> Result<PageReport> {
        let clean_title = sanitize_title(title);
        let page_dir = self.options.output_root.join(&clean_title);

        tokio::fs::create_dir_all(&page_dir)
            .await
            .with_context(|| format!("Failed to create directory {}", page_dir.display()))?;
        // Saved images and the report carry absolute paths
        let page_dir = tokio::fs::canonicalize(&page_dir)
            .await
            .with_context(|| format!("Failed to resolve directory {}", page_dir.display()))?;

        let document = ArticleDocument::parse(content);
        let mut report = PageReport {
            html_path: page_dir.join(format!("{}.html", clean_title)),
            ..PageReport::default()
        };

        // None = nothing changed, the fetched content is written as is
        let mut rendered = None;

        if self.options.include_images {
            let references = locate_images(&document);
            report.located = references.len();

            if references.is_empty() {
                self.bars.suspend(|| println!("ℹ️  No images found for '{}'.", title));
            } else {
                let images =
                    download_images(&self.fetcher, &references, &page_dir, &self.bars).await?;

                let rewritten = rewrite_image_sources(&document, &images.mapping, &page_dir);
                tracing::debug!(title, rewritten, "image sources rewritten");

                for skipped in &images.skipped {
                    tracing::info!(
                        title,
                        reference = %skipped.reference,
                        error = %skipped.error,
                        "image left pointing at its original source"
                    );
                }

                report.saved = images.saved.len();
                report.skipped = images.skipped.len();
                rendered = Some(document.to_html());
            }
        } else {
            report.stripped = strip_images(&document);
            rendered = Some(document.to_html());
        }

        let html = rendered.unwrap_or_else(|| content.to_string());
        tokio::fs::write(&report.html_path, html)
            .await
            .with_context(|| format!("Failed to write {}", report.html_path.display()))?;

        tracing::info!(
            title,
            path = %report.html_path.display(),
            located = report.located,
            saved = report.saved,
            skipped = report.skipped,
            stripped = report.stripped,
            "page exported"
        );
        Ok(report)
    }
}
