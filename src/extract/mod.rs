//! Element matching, text extraction and formatting.
//!
//! These are the pure, synchronous stages of a lookup:
//!
//! 1. [`matcher`]: find every element satisfying an [`ElementSelector`](crate::models::ElementSelector)
//! 2. [`text`]: flatten a matched element into text (recursive or shallow)
//! 3. [`format`]: run the [`FormatRules`](crate::models::FormatRules) pipeline over that text
//!
//! [`extract_lookup`] chains the three for a single [`LookupSpec`].

pub mod format;
pub mod matcher;
pub mod text;

use crate::error::ScrapeError;
use crate::html::render_node;
use crate::models::LookupSpec;
use crate::utils::truncate_for_log;
use scraper::Html;
use tracing::debug;

pub use matcher::find_matches;
pub use text::extract_text;

/// Run one lookup against a parsed document and return its formatted text.
///
/// The lookup's `follow` website is not handled here; see
/// [`crate::scrape::Scraper`].
pub fn extract_lookup(document: &Html, lookup: &LookupSpec) -> Result<String, ScrapeError> {
    let matches = find_matches(document, &lookup.selector)?;
    let Some(element) = matches.get(lookup.index).copied() else {
        return Err(ScrapeError::IndexOutOfRange {
            tag: lookup.selector.tag.clone(),
            index: lookup.index,
            found: matches.len(),
        });
    };
    debug!(
        tag = %lookup.selector.tag,
        index = lookup.index,
        matches = matches.len(),
        node = %truncate_for_log(&render_node(element), 200),
        "Selected element"
    );

    let raw = extract_text(element, lookup.shallow);
    if lookup.format.is_empty() {
        return Ok(raw);
    }
    Ok(lookup.format.apply(&raw))
}

/// Shared document for the extraction tests.
#[cfg(test)]
pub(crate) const TEST_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>TestHTML</title>
</head>
<body>
	<div>
		<header>
			<div id="testElementGetNodes">
				<span>This is the single element without attributes</span>
				<p id="singleElement_OneTag">This is the single element with one attribute</p>
				<p id="singleElement_MultipleTags" class="multipleTags">This is the single element with multiple attributes</p>
				<div class="hasDuplicate">This is the element with a duplicate</div>
				<div class="hasDuplicate">This is the second element of the duplicate</div>
				<p id="elementToBeTrimmed"> This is the element which needs some trimming </p>
				<a href="https://wikipedia.com/wiki/Wikipedia" id="websiteLink">https://wikipedia.com/wiki/Wikipedia</a>
				<p id="nestedElement">This is some <span id="insideOfNestedElement">nested text</span></p>
				<p id="emptyElement"></p>
			</div>
		</header>
	</div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementSelector, Replacement};

    fn document() -> Html {
        Html::parse_document(TEST_HTML)
    }

    #[test]
    fn test_extract_lookup_single_attribute() {
        let lookup = LookupSpec::new(ElementSelector::new("p").with_attribute("id", "singleElement_OneTag"));
        assert_eq!(
            extract_lookup(&document(), &lookup).unwrap(),
            "This is the single element with one attribute"
        );
    }

    #[test]
    fn test_extract_lookup_second_duplicate() {
        let mut lookup = LookupSpec::new(ElementSelector::new("div").with_attribute("class", "hasDuplicate"));
        lookup.index = 1;
        assert_eq!(
            extract_lookup(&document(), &lookup).unwrap(),
            "This is the second element of the duplicate"
        );
    }

    #[test]
    fn test_extract_lookup_index_out_of_range() {
        let mut lookup = LookupSpec::new(ElementSelector::new("div").with_attribute("class", "hasDuplicate"));
        lookup.index = 2;
        match extract_lookup(&document(), &lookup) {
            Err(ScrapeError::IndexOutOfRange { index, found, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(found, 2);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_lookup_index_five_of_two() {
        let mut lookup = LookupSpec::new(ElementSelector::new("div").with_attribute("class", "hasDuplicate"));
        lookup.index = 5;
        assert!(matches!(
            extract_lookup(&document(), &lookup),
            Err(ScrapeError::IndexOutOfRange { index: 5, found: 2, .. })
        ));
    }

    #[test]
    fn test_extract_lookup_missing_element() {
        let lookup = LookupSpec::new(ElementSelector::new("table"));
        assert!(matches!(
            extract_lookup(&document(), &lookup),
            Err(ScrapeError::MissingElement { ref tag }) if tag == "table"
        ));
    }

    #[test]
    fn test_extract_lookup_trimmed() {
        let mut lookup = LookupSpec::new(ElementSelector::new("p").with_attribute("id", "elementToBeTrimmed"));
        lookup.format.trim = vec![" ".to_string()];
        assert_eq!(
            extract_lookup(&document(), &lookup).unwrap(),
            "This is the element which needs some trimming"
        );
    }

    #[test]
    fn test_extract_lookup_hello_world() {
        let document = Html::parse_document(r#"<p id="x">Hello world</p>"#);
        let mut lookup = LookupSpec::new(ElementSelector::new("p").with_attribute("id", "x"));
        assert_eq!(extract_lookup(&document, &lookup).unwrap(), "Hello world");

        lookup.format.replacements.push(Replacement {
            from: " ".to_string(),
            to: "_".to_string(),
        });
        assert_eq!(extract_lookup(&document, &lookup).unwrap(), "Hello_world");
    }

    #[test]
    fn test_extract_lookup_shallow_flag() {
        let mut lookup = LookupSpec::new(ElementSelector::new("p").with_attribute("id", "nestedElement"));
        assert_eq!(extract_lookup(&document(), &lookup).unwrap(), "This is some nested text");

        lookup.shallow = true;
        assert_eq!(extract_lookup(&document(), &lookup).unwrap(), "This is some ");

        lookup.format.suffix = "...".to_string();
        assert_eq!(extract_lookup(&document(), &lookup).unwrap(), "This is some ...");
    }

    #[test]
    fn test_extract_lookup_empty_element() {
        let lookup = LookupSpec::new(ElementSelector::new("p").with_attribute("id", "emptyElement"));
        assert_eq!(extract_lookup(&document(), &lookup).unwrap(), "");
    }
}
