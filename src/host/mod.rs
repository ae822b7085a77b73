//! The host collaborator surface
//!
//! The IDE itself is not reimplemented here. Host integrations register
//! real callbacks against their extensibility API, convert host objects
//! to stable name strings, and feed the generators. The pipeline's only
//! view of the host is [`IdeStateProbe`]: a snapshot of which window and
//! document are active and what is currently open.

use std::sync::Arc;

use crate::types::{DocumentName, WindowName};

/// Read-only view of the host IDE's current UI state
pub trait IdeStateProbe: Send + Sync {
    /// Name of the window holding focus, if any
    fn active_window(&self) -> Option<WindowName>;

    /// Name of the document being edited, if any
    fn active_document(&self) -> Option<DocumentName>;

    /// Names of all open windows
    fn open_windows(&self) -> Vec<WindowName>;

    /// Names of all open documents
    fn open_documents(&self) -> Vec<DocumentName>;
}

/// Probe returning fixed state; for tests and headless embedding
#[derive(Debug, Default, Clone)]
pub struct StaticStateProbe {
    pub window: Option<WindowName>,
    pub document: Option<DocumentName>,
    pub windows: Vec<WindowName>,
    pub documents: Vec<DocumentName>,
}

impl StaticStateProbe {
    /// Probe with an active window and document
    pub fn focused(window: &str, document: &str) -> Arc<Self> {
        Arc::new(Self {
            window: Some(WindowName::new(window)),
            document: Some(DocumentName::new(document)),
            windows: vec![WindowName::new(window)],
            documents: vec![DocumentName::new(document)],
        })
    }

    /// Probe reporting no IDE state at all
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl IdeStateProbe for StaticStateProbe {
    fn active_window(&self) -> Option<WindowName> {
        self.window.clone()
    }

    fn active_document(&self) -> Option<DocumentName> {
        self.document.clone()
    }

    fn open_windows(&self) -> Vec<WindowName> {
        self.windows.clone()
    }

    fn open_documents(&self) -> Vec<DocumentName> {
        self.documents.clone()
    }
}
