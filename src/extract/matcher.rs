//! Selector matching over the parsed node tree.

use crate::error::ScrapeError;
use crate::models::{AttributeConstraint, ElementSelector};
use scraper::node::Element;
use scraper::{ElementRef, Html};

impl AttributeConstraint {
    /// Whether any attribute of `element` has exactly this name and value.
    pub fn is_satisfied_by(&self, element: &Element) -> bool {
        element
            .attrs()
            .any(|(name, value)| name == self.name && value == self.value)
    }
}

impl ElementSelector {
    /// Whether `element` has the selector's tag and every required attribute.
    pub fn matches(&self, element: &Element) -> bool {
        element.name() == self.tag
            && self
                .attributes
                .iter()
                .all(|constraint| constraint.is_satisfied_by(element))
    }
}

/// Find every element in `document` matching `selector`, in document order.
///
/// The whole tree is walked depth-first (pre-order). Descendants of a match
/// are still searched, so nested elements of the same shape are all
/// returned.
///
/// # Errors
///
/// [`ScrapeError::MissingElement`] when nothing matches.
pub fn find_matches<'a>(
    document: &'a Html,
    selector: &ElementSelector,
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let matches: Vec<ElementRef<'a>> = document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| selector.matches(element.value()))
        .collect();

    if matches.is_empty() {
        return Err(ScrapeError::MissingElement {
            tag: selector.tag.clone(),
        });
    }
    Ok(matches)
}
