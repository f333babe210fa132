use crate::core::types::Filing;
use roxmltree::{Document, Node};
use scraper::Html;

pub const MISSING_TIMESTAMP: &str = "N/A";
pub const MISSING_SUMMARY: &str = "No description";

/// Extracts one `Filing` per `<entry>`, in document order. Tags are matched on their
/// local name so both plain and Atom-namespaced feeds work. Text that does not parse as
/// XML yields no filings.
pub fn parse_feed(content: &str) -> Vec<Filing> {
    let document = match Document::parse(content) {
        Ok(document) => document,
        Err(e) => {
            log::warn!("Could not parse filing feed: {}", e);
            return Vec::new();
        }
    };

    let filings: Vec<Filing> = document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "entry")
        .map(|entry| Filing {
            timestamp: child_text(entry, "updated")
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| MISSING_TIMESTAMP.to_string()),
            summary: child_text(entry, "summary")
                .map(|s| sanitize_html(&s))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| MISSING_SUMMARY.to_string()),
        })
        .collect();

    log::debug!("Parsed {} entries from filing feed", filings.len());
    filings
}

fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .map(|child| {
            child
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect::<String>()
        })
}

// EDGAR ships entry summaries as escaped HTML.
fn sanitize_html(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    fragment
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
