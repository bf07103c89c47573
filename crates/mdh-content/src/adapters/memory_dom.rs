//! In-memory DOM
//!
//! Documents, elements and nested frames, with per-document focus. Tracks
//! installed listeners and alerts so callers can inspect what happened.

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::{DocumentId, ElementId, FocusCandidate, ListenerKind};
use crate::ports::{DomHost, MarkdownToggle, ToggleStart};

#[derive(Debug, Default)]
struct Document {
    active: Option<ElementId>,
    /// The frame element hosting this document, for nested documents.
    host_frame: Option<ElementId>,
}

#[derive(Debug)]
struct Element {
    document: DocumentId,
    renderable: bool,
    content: String,
    /// Content before rendering, while rendered.
    original: Option<String>,
    last_css: Option<String>,
    /// Document shown by this element if it is a frame.
    frame_document: Option<DocumentId>,
}

#[derive(Debug)]
struct DomState {
    next_id: u64,
    top: DocumentId,
    documents: HashMap<DocumentId, Document>,
    elements: HashMap<ElementId, Element>,
    listeners: Vec<(DocumentId, ListenerKind)>,
    alerts: Vec<String>,
}

impl DomState {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct MemoryDom {
    state: Mutex<DomState>,
}

impl MemoryDom {
    /// A DOM with an empty top document.
    pub fn new() -> Self {
        let top = DocumentId(0);
        let mut documents = HashMap::new();
        documents.insert(top, Document::default());
        Self {
            state: Mutex::new(DomState {
                next_id: 0,
                top,
                documents,
                elements: HashMap::new(),
                listeners: Vec::new(),
                alerts: Vec::new(),
            }),
        }
    }

    /// Add an element to `document`. Returns `None` if the document is gone.
    pub fn add_element(
        &self,
        document: DocumentId,
        renderable: bool,
        content: impl Into<String>,
    ) -> Option<FocusCandidate> {
        let mut state = self.state.lock();
        if !state.documents.contains_key(&document) {
            return None;
        }
        let element = ElementId(state.next());
        state.elements.insert(
            element,
            Element {
                document,
                renderable,
                content: content.into(),
                original: None,
                last_css: None,
                frame_document: None,
            },
        );
        Some(FocusCandidate::new(element, document))
    }

    /// Add a frame element to `parent` and return the nested document.
    pub fn add_frame(&self, parent: DocumentId) -> Option<DocumentId> {
        let mut state = self.state.lock();
        if !state.documents.contains_key(&parent) {
            return None;
        }
        let element = ElementId(state.next());
        let nested = DocumentId(state.next());
        state.elements.insert(
            element,
            Element {
                document: parent,
                renderable: false,
                content: String::new(),
                original: None,
                last_css: None,
                frame_document: Some(nested),
            },
        );
        state.documents.insert(
            nested,
            Document {
                active: None,
                host_frame: Some(element),
            },
        );
        Some(nested)
    }

    /// Focus an element, making every enclosing frame active as well.
    pub fn focus(&self, target: FocusCandidate) -> bool {
        let mut state = self.state.lock();
        if !state.elements.contains_key(&target.element) {
            return false;
        }
        let mut document = target.document;
        let mut element = target.element;
        loop {
            let Some(doc) = state.documents.get_mut(&document) else {
                return false;
            };
            doc.active = Some(element);
            let Some(frame) = doc.host_frame else {
                break;
            };
            let Some(parent) = state.elements.get(&frame).map(|e| e.document) else {
                break;
            };
            element = frame;
            document = parent;
        }
        true
    }

    /// Clear focus in every document.
    pub fn blur(&self) {
        let mut state = self.state.lock();
        for doc in state.documents.values_mut() {
            doc.active = None;
        }
    }

    /// Remove an element. Handles to it stay valid as values but refer to
    /// nothing afterwards.
    pub fn remove_element(&self, element: ElementId) -> bool {
        let mut state = self.state.lock();
        let Some(removed) = state.elements.remove(&element) else {
            return false;
        };
        for doc in state.documents.values_mut() {
            if doc.active == Some(element) {
                doc.active = None;
            }
        }
        if let Some(nested) = removed.frame_document {
            state.documents.remove(&nested);
        }
        true
    }

    pub fn content(&self, element: ElementId) -> Option<String> {
        self.state.lock().elements.get(&element).map(|e| e.content.clone())
    }

    pub fn last_css(&self, element: ElementId) -> Option<String> {
        self.state.lock().elements.get(&element).and_then(|e| e.last_css.clone())
    }

    pub fn is_rendered(&self, element: ElementId) -> bool {
        self.state
            .lock()
            .elements
            .get(&element)
            .is_some_and(|e| e.original.is_some())
    }

    /// Listeners installed so far, in order.
    pub fn listeners(&self) -> Vec<(DocumentId, ListenerKind)> {
        self.state.lock().listeners.clone()
    }

    pub fn listener_count(&self, document: DocumentId, kind: ListenerKind) -> usize {
        self.state
            .lock()
            .listeners
            .iter()
            .filter(|(doc, k)| *doc == document && *k == kind)
            .count()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().alerts.clone()
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl DomHost for MemoryDom {
    fn top_document(&self) -> DocumentId {
        self.state.lock().top
    }

    fn focused_element(&self) -> Option<FocusCandidate> {
        let state = self.state.lock();
        let mut document = state.top;
        let mut focused = None;
        // Bounded by the number of documents; guards against a cyclic frame graph
        for _ in 0..=state.documents.len() {
            let Some(active) = state.documents.get(&document).and_then(|d| d.active) else {
                break;
            };
            focused = Some(FocusCandidate::new(active, document));
            match state.elements.get(&active).and_then(|e| e.frame_document) {
                Some(nested) if state.documents.get(&nested).is_some_and(|d| d.active.is_some()) => {
                    document = nested;
                }
                _ => break,
            }
        }
        focused
    }

    fn is_renderable(&self, candidate: &FocusCandidate) -> bool {
        self.state
            .lock()
            .elements
            .get(&candidate.element)
            .is_some_and(|e| e.document == candidate.document && e.renderable)
    }

    fn add_event_listener(&self, document: DocumentId, kind: ListenerKind) {
        self.state.lock().listeners.push((document, kind));
    }

    fn alert(&self, message: &str) {
        self.state.lock().alerts.push(message.to_string());
    }
}

/// Toggles an element's content between its Markdown source and the
/// rendered HTML.
impl MarkdownToggle for MemoryDom {
    fn begin(&self, target: &FocusCandidate) -> Result<ToggleStart, String> {
        let mut state = self.state.lock();
        let element = state
            .elements
            .get_mut(&target.element)
            .ok_or_else(|| "The focused element is no longer in the page.".to_string())?;
        match element.original.take() {
            Some(original) => {
                element.content = original;
                element.last_css = None;
                Ok(ToggleStart::Reverted)
            }
            None if element.content.trim().is_empty() => {
                Err("There is no Markdown to render in the selected field.".to_string())
            }
            None => Ok(ToggleStart::Render {
                md_text: element.content.clone(),
            }),
        }
    }

    fn complete(&self, target: &FocusCandidate, html: &str, css: &str) {
        let mut state = self.state.lock();
        if let Some(element) = state.elements.get_mut(&target.element) {
            let original = std::mem::replace(&mut element.content, html.to_string());
            element.original = Some(original);
            element.last_css = Some(css.to_string());
        }
    }
}
