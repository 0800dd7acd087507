// src/document.rs
// =============================================================================
// The parsed article.
//
// The HTML from the API is parsed exactly once per export into an
// ArticleDocument. The image locator reads it, the rewriter mutates it in
// place, and the exporter serializes it back to text.
//
// We use `kuchikiki` rather than a read-only parser because rewriting needs
// to change attributes and detach nodes from the tree.
// =============================================================================

use kuchikiki::traits::TendrilSink;
use kuchikiki::{ElementData, NodeDataRef, NodeRef};

/// A parsed HTML tree for one article
pub struct ArticleDocument {
    root: NodeRef,
}

impl ArticleDocument {
    /// Parses article HTML (a fragment or a full document)
    pub fn parse(html: &str) -> Self {
        Self {
            root: kuchikiki::parse_html().one(html),
        }
    }

    /// All elements matching a CSS selector, in document order
    ///
    /// Selectors used by this crate are constants, so an invalid one is a
    /// programmer error and panics.
    pub fn select(&self, selector: &str) -> Vec<NodeDataRef<ElementData>> {
        self.root
            .select(selector)
            .unwrap_or_else(|_| panic!("invalid CSS selector: {}", selector))
            .collect()
    }

    /// The first element matching a CSS selector, if any
    pub fn select_first(&self, selector: &str) -> Option<NodeDataRef<ElementData>> {
        self.root.select_first(selector).ok()
    }

    /// Serializes the (possibly mutated) tree back to HTML text
    pub fn to_html(&self) -> String {
        self.root.to_string()
    }
}

// Reads an attribute off an element as an owned String
//
// The attribute map lives in a RefCell, so we copy the value out instead of
// holding the borrow.
pub fn attr(element: &NodeDataRef<ElementData>, name: &str) -> Option<String> {
    element.attributes.borrow().get(name).map(str::to_string)
}
