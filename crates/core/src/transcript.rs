//! Conversation history of the chat console.

use rag_console_proto::Turn;

use crate::notice;

/// The ordered turns of one chat session, oldest first.
///
/// Only the [`crate::ChatController`] that owns a transcript can change it.
/// Callers get snapshots.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Returns the turns in conversation order.
    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if no exchange has completed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the most recent turn.
    #[inline]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Renders the transcript as `ROLE: content` blocks separated by a
    /// blank line, or a placeholder when there is nothing to show.
    pub fn render(&self) -> String {
        if self.turns.is_empty() {
            return notice::EMPTY_TRANSCRIPT.to_owned();
        }
        self.turns
            .iter()
            .map(|turn| {
                format!(
                    "{}: {}",
                    turn.role.as_str().to_ascii_uppercase(),
                    turn.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[inline]
    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    #[inline]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.turns.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(Transcript::default().render(), "Response will appear here.");
    }

    #[test]
    fn test_render() {
        let mut transcript = Transcript::default();
        transcript.push(Turn::user("What is RAG?"));
        transcript.push(Turn::assistant("Retrieval-augmented generation."));

        let rendered = transcript.render();
        assert_eq!(
            rendered,
            "USER: What is RAG?\n\nASSISTANT: Retrieval-augmented generation."
        );
        assert_eq!(transcript.render(), rendered);
    }

    #[test]
    fn test_truncate() {
        let mut transcript = Transcript::default();
        transcript.push(Turn::user("a"));
        transcript.push(Turn::assistant("b"));
        transcript.push(Turn::user("c"));
        transcript.truncate(2);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.last(), Some(&Turn::assistant("b")));
    }
}
