// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Everything is optional: with no titles and no --images/--no-images flag,
// the tool falls back to asking on the console (see prompt.rs).
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::images::DEFAULT_IMAGE_ORIGIN;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "wiki-export",
    version,
    about = "Export Wikipedia articles as standalone HTML files",
    long_about = "wiki-export fetches the rendered HTML of Wikipedia articles and saves each one \
                  as <output>/<title>/<title>.html. With --images, the pictures are downloaded \
                  next to the HTML and the page is rewritten to use them, so it renders offline."
)]
pub struct Cli {
    /// Page titles to export (e.g. "Dog" "C/C++")
    ///
    /// When omitted, titles are read from the console one per line
    pub titles: Vec<String>,

    /// Download images and rewrite the page to use the local copies
    #[arg(long, conflicts_with = "no_images")]
    pub images: bool,

    /// Remove all images from the saved pages
    #[arg(long)]
    pub no_images: bool,

    /// Wikipedia language edition (en, de, fr, ...)
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Directory that receives one folder per page
    #[arg(short, long, default_value = "Wikipedia export")]
    pub output: PathBuf,

    /// Origin that relative image references are resolved against
    #[arg(long, default_value = DEFAULT_IMAGE_ORIGIN)]
    pub image_origin: String,

    /// Hide the page and image progress bars
    #[arg(short, long)]
    pub quiet: bool,

    /// More diagnostic output on stderr (-v, -vv, -vvv)
    ///
    /// RUST_LOG overrides this when set
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    // The images choice made on the command line, if any
    //
    // Returns None when neither --images nor --no-images was given
    pub fn include_images(&self) -> Option<bool> {
        if self.images {
            Some(true)
        } else if self.no_images {
            Some(false)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wiki-export"]).unwrap();
        assert!(cli.titles.is_empty());
        assert_eq!(cli.include_images(), None);
        assert_eq!(cli.lang, "en");
        assert_eq!(cli.output, PathBuf::from("Wikipedia export"));
        assert_eq!(cli.image_origin, DEFAULT_IMAGE_ORIGIN);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_titles_and_flags() {
        let cli = Cli::try_parse_from([
            "wiki-export", "--images", "-l", "de", "-vv", "Hund", "C/C++",
        ])
        .unwrap();
        assert_eq!(cli.titles, vec!["Hund", "C/C++"]);
        assert_eq!(cli.include_images(), Some(true));
        assert_eq!(cli.lang, "de");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_images_flags_conflict() {
        let result = Cli::try_parse_from(["wiki-export", "--images", "--no-images", "Dog"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_images_flag() {
        let cli = Cli::try_parse_from(["wiki-export", "--no-images", "Dog"]).unwrap();
        assert_eq!(cli.include_images(), Some(false));
    }
}
