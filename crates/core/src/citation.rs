use rag_console_proto::Citation;

use crate::notice;

/// Renders citations as a numbered list, one `N. source` line followed by
/// the quoted passage per entry, entries separated by a blank line.
///
/// An empty slice renders a placeholder.
pub fn render_citations(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return notice::NO_CITATIONS.to_owned();
    }
    citations
        .iter()
        .enumerate()
        .map(|(idx, citation)| {
            let source = citation
                .source_key
                .as_deref()
                .unwrap_or(notice::UNKNOWN_SOURCE);
            let quote = citation.quote.as_deref().unwrap_or_default();
            format!("{}. {source}\n\"{quote}\"", idx + 1)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
