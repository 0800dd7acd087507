// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Ask on the console for anything the arguments left out
// 3. Fetch and export each page, one after the other
// 4. Print a summary and exit with a proper code
//    (0 = all pages exported, 1 = some pages missing, 2 = error)
//
// Pages are processed strictly in sequence: fetch, download every image,
// rewrite, save, then the next page.
// =============================================================================

mod cli;
mod document;
mod export;
mod images;
mod logging;
mod progress;
mod prompt;
mod sanitize;
mod wiki;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use export::{ExportOptions, PageExporter, PageReport};
use images::{ImageFetcher, BROWSER_USER_AGENT};
use wiki::{WikiClient, API_USER_AGENT, DEFAULT_API_TEMPLATE};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Totals across all pages of a run
#[derive(Debug, Default)]
struct RunSummary {
    exported: usize,
    missing: usize,
    images_saved: usize,
    images_skipped: usize,
}

impl RunSummary {
    fn record(&mut self, report: &PageReport) {
        self.exported += 1;
        self.images_saved += report.saved;
        self.images_skipped += report.skipped;
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let (include_images, titles) = gather_input(&cli)?;
    if titles.is_empty() {
        println!("No page titles given, nothing to export.");
        return Ok(0);
    }

    let wiki = WikiClient::new(DEFAULT_API_TEMPLATE, API_USER_AGENT)?;
    let fetcher = ImageFetcher::new(&cli.image_origin, BROWSER_USER_AGENT)?;
    let exporter = PageExporter::new(
        fetcher,
        ExportOptions {
            output_root: cli.output.clone(),
            include_images,
            show_progress: !cli.quiet,
        },
    );

    let summary = export_pages(&wiki, &exporter, &cli.lang, &titles).await?;

    print_summary(&summary);
    print_farewell();

    Ok(if summary.missing > 0 { 1 } else { 0 })
}

// Resolves the images choice and the title list
//
// Command-line values win; whatever is missing is asked on the console
fn gather_input(cli: &Cli) -> Result<(bool, Vec<String>)> {
    let include_images = match cli.include_images() {
        Some(choice) => choice,
        None => prompt::ask_include_images()?,
    };

    let titles = if cli.titles.is_empty() {
        prompt::read_page_titles()?
    } else {
        cli.titles
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    };

    Ok((include_images, titles))
}

// Fetches and exports every title in order
//
// A page that can't be fetched is reported and skipped. An export error
// (filesystem) stops the whole run.
async fn export_pages(
    wiki: &WikiClient,
    exporter: &PageExporter,
    lang: &str,
    titles: &[String],
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let bars = exporter.progress();
    let pages = progress::counter(bars, titles.len(), "pages")?;

    for title in titles {
        pages.set_message(title.clone());

        match wiki.fetch_article(title, lang).await {
            Ok(Some(content)) => {
                let report = exporter.export(title, &content).await?;
                bars.suspend(|| {
                    println!("📄 {}", title);
                    println!("   ✅ Saved {}", report.html_path.display());
                    if report.skipped > 0 {
                        println!("   ⚠️  {} image(s) could not be downloaded", report.skipped);
                    }
                });
                summary.record(&report);
            }
            Ok(None) => {
                bars.suspend(|| {
                    println!(
                        "❌ Page '{}' does not exist on Wikipedia or the content could not be retrieved.",
                        title
                    )
                });
                summary.missing += 1;
            }
            Err(e) => {
                bars.suspend(|| println!("⚠️  Could not fetch '{}': {:#}", title, e));
                summary.missing += 1;
            }
        }

        pages.inc(1);
    }

    pages.finish_and_clear();
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 Summary:");
    println!("   ✅ Exported: {}", summary.exported);
    println!("   ❌ Missing: {}", summary.missing);
    println!("   🖼️  Images saved: {}", summary.images_saved);
    println!("   ⏭️  Images skipped: {}", summary.images_skipped);
}

fn print_farewell() {
    println!();
    println!("Thank you for using the Wikipedia to HTML exporter.");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_summary_records_reports() {
        let mut summary = RunSummary::default();
        summary.record(&PageReport {
            html_path: PathBuf::from("Dog/Dog.html"),
            located: 4,
            saved: 2,
            skipped: 1,
            stripped: 0,
        });
        summary.record(&PageReport::default());

        assert_eq!(summary.exported, 2);
        assert_eq!(summary.images_saved, 2);
        assert_eq!(summary.images_skipped, 1);
        assert_eq!(summary.missing, 0);
    }

    #[tokio::test]
    async fn test_export_pages_skips_missing_and_continues() {
        use tempfile::TempDir;
        use wiremock::matchers::{method, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "Nope"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist."}}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("page", "Dog"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"parse":{"title":"Dog","text":{"*":"<p>Woof <img src=\"/x/Dog.jpg\"></p>"}}}"#,
            ))
            .mount(&server)
            .await;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Wikipedia export");
        let wiki = WikiClient::new(&format!("{}/w/api.php", server.uri()), API_USER_AGENT).unwrap();
        let exporter = PageExporter::new(
            ImageFetcher::new(&server.uri(), "wiki-export-test").unwrap(),
            ExportOptions {
                output_root: root.clone(),
                include_images: false,
                show_progress: false,
            },
        );

        let titles = vec!["Nope".to_string(), "Dog".to_string()];
        let summary = export_pages(&wiki, &exporter, "en", &titles).await.unwrap();

        assert_eq!(summary.exported, 1);
        assert_eq!(summary.missing, 1);
        assert!(!root.join("Nope").exists());

        let html = std::fs::read_to_string(root.join("Dog").join("Dog.html")).unwrap();
        assert!(html.contains("Woof"));
        assert!(!html.contains("<img"));
    }
}
