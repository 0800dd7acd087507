// src/images/rewrite.rs
// =============================================================================
// Downloads a page's images and points the document at the local copies.
//
// How it works:
// 1. Drop exact duplicate references (the locator reports most images twice)
// 2. Download each one via ImageFetcher into the page directory
// 3. Give it a free name: "Dog.jpg", then "Dog_1.jpg", "Dog_2.jpg", ...
// 4. Remember sanitized basename -> saved path in a FilenameMapping
//    (a later image with the same basename replaces the earlier entry)
// 5. Walk every <img>, look its basename up and rewrite src/srcset
//
// Images that failed to download are left alone: their <img> keeps the
// original remote src.
//
// When images are not wanted at all, strip_images() removes every <img>.
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::MultiProgress;

use super::fetch::{reference_basename, FetchError, ImageFetcher};
use crate::document::{attr, ArticleDocument};
use crate::progress;
use crate::sanitize::sanitize_file_name;

/// Sanitized basename -> final path of the saved file
pub type FilenameMapping = HashMap<String, PathBuf>;

/// An image that could not be saved
#[derive(Debug)]
pub struct SkippedImage {
    pub reference: String,
    pub error: FetchError,
}

/// Result of downloading one page's images
#[derive(Debug, Default)]
pub struct DownloadedImages {
    pub mapping: FilenameMapping,
    /// Saved files, in download order
    pub saved: Vec<PathBuf>,
    pub skipped: Vec<SkippedImage>,
}

// Downloads every unique reference into `dest_dir`
//
// Parameters:
//   fetcher: shared image downloader
//   references: located references (duplicates allowed)
//   dest_dir: page directory, must already exist
//   bars: the run's progress bars; an image bar is added for this page
//
// Download failures are collected in `skipped`; only filesystem errors
// (moving a finished download into place) are returned as Err.
pub async fn download_images(
    fetcher: &ImageFetcher,
    references: &[String],
    dest_dir: &Path,
    bars: &MultiProgress,
) -> Result<DownloadedImages> {
    let unique = dedupe(references);
    let bar = progress::counter(bars, unique.len(), "images")?;
    let mut images = DownloadedImages::default();

    for reference in unique {
        let basename = reference_basename(reference);
        bar.set_message(basename.clone().unwrap_or_default());

        let outcome = match basename {
            Some(basename) => fetcher
                .fetch(reference, dest_dir)
                .await
                .map(|staging| (sanitize_file_name(&basename), staging)),
            None => Err(FetchError::InvalidReference(reference.clone())),
        };

        match outcome {
            Ok((name, staging)) => {
                let final_path = unique_path(dest_dir, &name);
                let staged_at = staging.display().to_string();
                staging.persist(&final_path).with_context(|| {
                    format!("Failed to move {} to {}", staged_at, final_path.display())
                })?;

                tracing::debug!(reference = %reference, path = %final_path.display(), "image saved");

                images.mapping.insert(name, final_path.clone());
                images.saved.push(final_path);
            }
            Err(error) => {
                bar.println(format!("  ⏭️  Skipped {} ({})", reference, error));
                tracing::warn!(reference = %reference, %error, "image skipped");

                images.skipped.push(SkippedImage {
                    reference: reference.clone(),
                    error,
                });
            }
        }

        bar.inc(1);
    }

    bar.finish_and_clear();
    bars.remove(&bar);
    Ok(images)
}

// Points every <img> with a saved counterpart at the local file
//
// Returns: how many <img> elements were rewritten
pub fn rewrite_image_sources(
    document: &ArticleDocument,
    mapping: &FilenameMapping,
    dest_dir: &Path,
) -> usize {
    let mut rewritten = 0;

    for img in document.select("img") {
        let Some(src) = attr(&img, "src") else {
            continue;
        };
        let Some(basename) = reference_basename(&src) else {
            continue;
        };
        let Some(saved) = mapping.get(&sanitize_file_name(&basename)) else {
            continue;
        };

        let local = relative_path(saved, dest_dir);
        let mut attributes = img.attributes.borrow_mut();
        if attributes.contains("srcset") {
            attributes.insert("srcset", local.clone());
        }
        attributes.insert("src", local);
        rewritten += 1;
    }

    rewritten
}

// Removes every <img> element from the document
//
// Returns: how many were removed
pub fn strip_images(document: &ArticleDocument) -> usize {
    let images = document.select("img");
    for img in &images {
        img.as_node().detach();
    }
    images.len()
}

// Keeps the first occurrence of each reference, in order
fn dedupe(references: &[String]) -> Vec<&String> {
    let mut seen = HashSet::new();
    references
        .iter()
        .filter(|reference| seen.insert(reference.as_str()))
        .collect()
}

// Picks a name in `dir` that no file uses yet
//
// Example (Dog.jpg already exists):
//   "Dog.jpg" -> dir/Dog_1.jpg, then dir/Dog_2.jpg, ...
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let extension = as_path.extension().map(|e| e.to_string_lossy().into_owned());

    (1..)
        .map(|counter| match &extension {
            Some(ext) => dir.join(format!("{}_{}.{}", stem, counter, ext)),
            None => dir.join(format!("{}_{}", stem, counter)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

// Path of `saved` relative to `dir`, with forward slashes for HTML
fn relative_path(saved: &Path, dir: &Path) -> String {
    saved
        .strip_prefix(dir)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| display_name(saved))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why borrow_mut() on attributes?
//    - kuchikiki keeps element attributes in a RefCell
//    - borrow() to read, borrow_mut() to change; the borrow ends when the
//      guard goes out of scope at the end of the loop body
//
// 2. What does (1..).map(...).find(...) do?
//    - 1.. is an endless range 1, 2, 3, ...
//    - find() stops at the first candidate path that doesn't exist yet
//
// 3. Why HashSet::insert inside filter()?
//    - insert returns false when the value was already there
//    - So the filter keeps only the first time each reference is seen
// -----------------------------------------------------------------------------
