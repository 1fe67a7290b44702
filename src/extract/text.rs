//! Text extraction from matched elements.

use scraper::{ElementRef, Node};

/// Flatten an element into its text.
///
/// Recursive mode concatenates every descendant text node in document
/// order, without separators. Shallow mode only reads the element's own
/// text children; nested elements contribute nothing, so for
/// `<p>This is some <span>nested text</span></p>` it yields
/// `"This is some "`.
pub fn extract_text(element: ElementRef<'_>, shallow: bool) -> String {
    if shallow {
        element
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(&*text.text),
                _ => None,
            })
            .collect()
    } else {
        element.text().collect()
    }
}
