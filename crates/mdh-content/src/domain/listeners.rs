//! At-most-once listener registry.

use std::collections::HashSet;

use super::dom::{DocumentId, ListenerKind};

/// Which `(document, kind)` listeners are already installed.
///
/// Attaching the same pair twice is a no-op, so a listener never fires
/// twice for one event.
#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    attached: HashSet<(DocumentId, ListenerKind)>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listener. True only if it was not attached yet.
    pub fn attach(&mut self, document: DocumentId, kind: ListenerKind) -> bool {
        self.attached.insert((document, kind))
    }

    pub fn contains(&self, document: DocumentId, kind: ListenerKind) -> bool {
        self.attached.contains(&(document, kind))
    }

    /// Drop every listener of a document that went away.
    pub fn forget(&mut self, document: DocumentId) -> usize {
        let before = self.attached.len();
        self.attached.retain(|(doc, _)| *doc != document);
        before - self.attached.len()
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
