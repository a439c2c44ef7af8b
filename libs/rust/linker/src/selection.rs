use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::error::Result;
use crate::loader::LoadState;
use crate::models::SummaryData;
use crate::similarity::paragraph_similarities;

/// Tracks which summary sentence is highlighted and how strongly each
/// paragraph relates to it. Follows the loader it was created from: a new
/// document clears the selection.
pub struct SelectionController {
    state: watch::Receiver<LoadState>,
    data: Option<Arc<SummaryData>>,
    highlighted: Option<usize>,
    similarities: Option<Vec<f64>>,
}

impl SelectionController {
    pub fn new(mut state: watch::Receiver<LoadState>) -> Self {
        let data = state.borrow_and_update().data().cloned();
        Self {
            state,
            data,
            highlighted: None,
            similarities: None,
        }
    }

    /// Picks up the loader's latest state. Returns true if the bound document
    /// changed.
    pub fn refresh(&mut self) -> bool {
        if !self.state.has_changed().unwrap_or(false) {
            return false;
        }

        let latest = self.state.borrow_and_update().data().cloned();
        match latest {
            Some(data) => {
                let same = self
                    .data
                    .as_ref()
                    .is_some_and(|current| Arc::ptr_eq(current, &data));
                if same {
                    return false;
                }
                self.on_document_loaded(data);
            }
            None => {
                if self.data.is_none() {
                    return false;
                }
                self.data = None;
                self.clear_selection();
            }
        }
        true
    }

    pub fn on_document_loaded(&mut self, data: Arc<SummaryData>) {
        debug!(
            sentences = data.sentences.len(),
            paragraphs = data.paragraphs.len(),
            "Document loaded, selection reset"
        );
        self.data = Some(data);
        self.clear_selection();
    }

    /// Highlights sentence `index` and recomputes paragraph similarities.
    /// Does nothing until a document is ready; an index past the last
    /// sentence is an error and leaves the current selection in place.
    pub fn select_sentence(&mut self, index: usize) -> Result<()> {
        self.refresh();

        let Some(data) = &self.data else {
            debug!(index = index, "Ignoring selection before document is ready");
            return Ok(());
        };

        let similarities = paragraph_similarities(data, index)?;
        debug!(index = index, paragraphs = similarities.len(), "Sentence selected");
        self.highlighted = Some(index);
        self.similarities = Some(similarities);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.data.is_some()
    }

    pub fn sentences(&self) -> Option<Vec<&str>> {
        self.data.as_ref().map(|data| data.sentence_texts())
    }

    pub fn paragraphs(&self) -> Option<Vec<&str>> {
        self.data.as_ref().map(|data| data.paragraph_texts())
    }

    pub fn highlighted_sentence(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn similarities(&self) -> Option<&[f64]> {
        self.similarities.as_deref()
    }

    pub fn similarity_of(&self, paragraph: usize) -> Option<f64> {
        self.similarities
            .as_ref()
            .and_then(|values| values.get(paragraph).copied())
    }

    fn clear_selection(&mut self) {
        self.highlighted = None;
        self.similarities = None;
    }
}
