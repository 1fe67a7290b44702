//! Plain text rendering of a [`ScrapeReport`].

use crate::models::ScrapeReport;

/// One `label<TAB>content` line per successful website.
///
/// Newlines inside content are escaped so every website stays on one line.
/// Failed websites are left out; they are reported through logging.
pub fn render_lines(report: &ScrapeReport) -> String {
    let mut out = String::new();
    for outcome in &report.results {
        if let Some(content) = &outcome.content {
            out.push_str(&outcome.website);
            out.push('\t');
            out.push_str(&content.replace('\n', "\\n"));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScrapeOutcome;

    #[test]
    fn test_render_lines_skips_failures() {
        let report = ScrapeReport {
            local_date: "2025-05-06".to_string(),
            local_time: "07:00:00".to_string(),
            results: vec![
                ScrapeOutcome {
                    website: "wiki".to_string(),
                    url: "https://a".to_string(),
                    content: Some("Wikipedia\nFree".to_string()),
                    error: None,
                },
                ScrapeOutcome {
                    website: "broken".to_string(),
                    url: "https://b".to_string(),
                    content: None,
                    error: Some("missing <h1> in the node tree".to_string()),
                },
            ],
        };
        assert_eq!(render_lines(&report), "wiki\tWikipedia\\nFree\n");
        assert_eq!(report.failures(), 1);
    }
}
