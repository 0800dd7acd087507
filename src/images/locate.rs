// src/images/locate.rs
// =============================================================================
// Finds image references in an article.
//
// Wikipedia pages put images in three places we care about:
// 1. The infobox (the side panel table)
// 2. A gallery block (MediaWiki's grid of thumbnails)
// 3. Anywhere else as a plain <img src="...">
//
// We return the src values context by context, in document order. The
// same image usually shows up twice (once from its context, once from the
// generic scan). Duplicates are kept here; the rewriter decides what to do
// with them.
// =============================================================================

use crate::document::{attr, ArticleDocument};

const INFOBOX_SELECTOR: &str = "table.infobox";
const GALLERY_SELECTOR: &str = "div.gallery, ul.gallery";
const IMAGE_SELECTOR: &str = "img[src]";

// Locates every image reference in the document
//
// Returns: infobox images ++ gallery images ++ all images
pub fn locate_images(document: &ArticleDocument) -> Vec<String> {
    let mut images = Vec::new();

    images.extend(images_within(document, INFOBOX_SELECTOR));
    images.extend(images_within(document, GALLERY_SELECTOR));
    images.extend(
        document
            .select(IMAGE_SELECTOR)
            .iter()
            .filter_map(|img| attr(img, "src")),
    );

    images
}

// Image sources inside the first element matching `container`
fn images_within(document: &ArticleDocument, container: &str) -> Vec<String> {
    let Some(container) = document.select_first(container) else {
        return Vec::new();
    };

    // select() on a node yields its descendants only
    match container.as_node().select(IMAGE_SELECTOR) {
        Ok(images) => images.filter_map(|img| attr(&img, "src")).collect(),
        Err(_) => Vec::new(),
    }
}
