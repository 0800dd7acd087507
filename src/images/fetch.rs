// src/images/fetch.rs
// =============================================================================
// Downloads a single image to disk.
//
// Steps:
// 1. Resolve the reference against the wiki origin (handles "/path",
//    "//host/path" and full URLs)
// 2. GET it with a browser-like User-Agent (upload.wikimedia.org rejects
//    default client identifiers)
// 3. Stream the body chunk by chunk into a fresh "<name>.XXXXXX.part" file
//    in the target dir. The random part means a staging file can never land
//    on an image that is already saved there.
//
// Failures are returned as a FetchError instead of being propagated with
// anyhow: the caller treats every kind as "image unavailable" and moves on,
// but still wants to know which kind it was.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use tempfile::TempPath;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::sanitize::sanitize_file_name;

/// Origin that relative image references are resolved against
pub const DEFAULT_IMAGE_ORIGIN: &str = "https://en.wikipedia.org";

/// User-Agent sent with image requests
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Suffix of the file an image is streamed into before it gets its final name
pub const STAGING_SUFFIX: &str = ".part";

/// Why an image could not be downloaded
#[derive(Debug, Error)]
pub enum FetchError {
    /// The reference could not be turned into an http(s) URL with a file name
    #[error("cannot resolve image reference '{0}'")]
    InvalidReference(String),
    /// Network, DNS, TLS or body read failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(StatusCode),
    /// Writing the staging file failed
    #[error("could not write image: {0}")]
    Io(#[from] std::io::Error),
}

// Downloads images relative to one origin
//
// The reqwest Client is built once and reused for every image of every
// page (connection pooling).
pub struct ImageFetcher {
    client: Client,
    origin: Url,
}

impl ImageFetcher {
    pub fn new(origin: &str, user_agent: &str) -> Result<Self> {
        let origin =
            Url::parse(origin).with_context(|| format!("Invalid image origin '{}'", origin))?;
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, origin })
    }

    // Resolves a reference to an absolute http(s) URL
    //
    // Examples (origin = https://en.wikipedia.org):
    //   "/static/x.png"         -> https://en.wikipedia.org/static/x.png
    //   "//upload.wikimedia.org/a.jpg" -> https://upload.wikimedia.org/a.jpg
    //   "data:image/png;base64,..."    -> None
    pub fn resolve(&self, reference: &str) -> Option<Url> {
        let url = self.origin.join(reference).ok()?;
        match url.scheme() {
            "http" | "https" => Some(url),
            _ => None,
        }
    }

    // Downloads `reference` into `dest_dir`
    //
    // Returns: the staging file that now holds the image bytes. The caller
    // persists it under its final name; dropping it deletes the file.
    pub async fn fetch(&self, reference: &str, dest_dir: &Path) -> Result<TempPath, FetchError> {
        let invalid = || FetchError::InvalidReference(reference.to_string());

        let url = self.resolve(reference).ok_or_else(invalid)?;
        let name = url_basename(&url).ok_or_else(invalid)?;

        tracing::debug!(%url, dir = %dest_dir.display(), "downloading image");

        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        // Created with O_EXCL, so it never truncates an existing file
        let (file, staging) = tempfile::Builder::new()
            .prefix(&format!("{}.", sanitize_file_name(&name)))
            .suffix(STAGING_SUFFIX)
            .tempfile_in(dest_dir)?
            .into_parts();

        // On error `staging` is dropped here and the partial file goes with it
        write_body(&mut response, tokio::fs::File::from_std(file)).await?;

        Ok(staging)
    }
}

async fn write_body(
    response: &mut Response,
    mut file: tokio::fs::File,
) -> Result<(), FetchError> {
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

// The last path segment of a reference, as it appears in the URL
//
// Query strings and fragments are ignored, percent-escapes are kept.
// Used both for naming downloads and for matching <img> tags back to them.
pub fn reference_basename(reference: &str) -> Option<String> {
    let base = Url::parse(DEFAULT_IMAGE_ORIGIN).ok()?;
    let url = base.join(reference).ok()?;
    url_basename(&url)
}

fn url_basename(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
