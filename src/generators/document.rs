//! Document event generator
//!
//! Opened/saved/closing callbacks map one-to-one onto events and fire
//! synchronously. Merging of bursty identical notifications is a
//! downstream concern of the event stream, never of this generator.

use crate::types::{DocumentAction, DocumentData, DocumentName, EventPayload};

use super::GeneratorContext;

pub struct DocumentEventGenerator {
    context: GeneratorContext,
}

impl DocumentEventGenerator {
    pub fn new(context: GeneratorContext) -> Self {
        Self { context }
    }

    pub fn on_opened(&self, document: DocumentName) {
        self.fire(DocumentAction::Opened, document);
    }

    pub fn on_saved(&self, document: DocumentName) {
        self.fire(DocumentAction::Saved, document);
    }

    pub fn on_closing(&self, document: DocumentName) {
        self.fire(DocumentAction::Closing, document);
    }

    fn fire(&self, action: DocumentAction, document: DocumentName) {
        self.context
            .fire_now(EventPayload::Document(DocumentData { action, document }));
    }
}
