//! Where the controllers show their results.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// An independently updated text region of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pane {
    /// Transcript, reply or chat error text.
    Result,
    /// Citations of the latest chat reply.
    Citations,
    /// One-line query status.
    Status,
    /// The GraphQL the backend ran for a query.
    Graphql,
    /// Query records, or the failure payload.
    Records,
}

/// A display target.
///
/// Each call replaces the whole content of a pane. Implementations are
/// called from inside the controllers, so they should return quickly and
/// must not call back into the controller.
pub trait Surface: Send + Sync {
    /// Replaces the text of a pane.
    fn set_text(&self, pane: Pane, text: &str);

    /// Shows an in-progress indicator on a pane. The next `set_text` on the
    /// same pane ends it.
    fn set_busy(&self, pane: Pane, message: &str) {
        self.set_text(pane, message);
    }
}

impl<S: Surface + ?Sized> Surface for Arc<S> {
    #[inline]
    fn set_text(&self, pane: Pane, text: &str) {
        (**self).set_text(pane, text);
    }

    #[inline]
    fn set_busy(&self, pane: Pane, message: &str) {
        (**self).set_busy(pane, message);
    }
}

#[derive(Debug, Default)]
struct Panes {
    texts: HashMap<Pane, String>,
    updates: Vec<(Pane, String)>,
}

/// A surface that keeps the latest text of every pane in memory.
///
/// Clones share the same panes, so a host can keep one clone and hand the
/// other to a controller.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    panes: Arc<Mutex<Panes>>,
}

impl MemorySurface {
    /// Returns the current text of a pane, if it was ever set.
    pub fn text(&self, pane: Pane) -> Option<String> {
        self.panes().texts.get(&pane).cloned()
    }

    /// Returns every update in the order it happened.
    pub fn updates(&self) -> Vec<(Pane, String)> {
        self.panes().updates.clone()
    }

    fn panes(&self) -> MutexGuard<'_, Panes> {
        self.panes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Surface for MemorySurface {
    fn set_text(&self, pane: Pane, text: &str) {
        let mut panes = self.panes();
        panes.texts.insert(pane, text.to_owned());
        panes.updates.push((pane, text.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface() {
        let surface = MemorySurface::default();
        let shared: Arc<dyn Surface> = Arc::new(surface.clone());
        assert_eq!(surface.text(Pane::Result), None);

        shared.set_busy(Pane::Result, "Sending...");
        shared.set_text(Pane::Result, "done");
        shared.set_text(Pane::Status, "");

        assert_eq!(surface.text(Pane::Result).as_deref(), Some("done"));
        assert_eq!(surface.text(Pane::Status).as_deref(), Some(""));
        assert_eq!(surface.updates().len(), 3);
        assert_eq!(
            surface.updates()[0],
            (Pane::Result, "Sending...".to_owned())
        );
    }
}
