//! Request lifecycle for one document session.
//!
//! Every `submit` bumps a generation counter and moves the state to
//! `Loading`. The fetch runs on a spawned task; when it completes, its result
//! is published only if its generation is still the current one, so a slow
//! answer for an older document can never overwrite a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, SummaryError};
use crate::models::SummaryData;
use crate::source::{MAX_PROMPT_TOKENS, SummariserApi, SummarySource, approximate_tokens};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<SummaryData>),
    Failed(SummaryError),
}

impl LoadState {
    /// True once the current submission has produced a result.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Ready(_) | LoadState::Failed(_))
    }

    pub fn data(&self) -> Option<&Arc<SummaryData>> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SummaryError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Flattened view for presenters that only render text.
    pub fn view(&self) -> StatusView {
        match self {
            LoadState::Idle => StatusView::Idle,
            LoadState::Loading => StatusView::Loading,
            LoadState::Ready(data) => StatusView::Ready {
                paragraphs: data.paragraphs.iter().map(|p| p.text.clone()).collect(),
                sentences: data.sentences.iter().map(|s| s.text.clone()).collect(),
            },
            LoadState::Failed(err) => StatusView::Failed(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusView {
    Idle,
    Loading,
    Ready {
        paragraphs: Vec<String>,
        sentences: Vec<String>,
    },
    Failed(String),
}

/// Handle for one `submit` call.
#[derive(Debug)]
pub struct Submission {
    pub generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Submission {
    /// Waits for the request task to finish, whether or not its result was
    /// still current when it arrived.
    pub async fn finished(self) {
        if let Some(task) = self.task {
            if let Err(err) = task.await {
                warn!(generation = self.generation, error = %err, "Load task did not complete");
            }
        }
    }
}

struct Shared {
    state: watch::Sender<LoadState>,
    generation: Mutex<u64>,
}

impl Shared {
    fn lock_generation(&self) -> MutexGuard<'_, u64> {
        self.generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes `result` if `generation` is still current. Returns whether
    /// the state was updated.
    fn complete(&self, generation: u64, result: Result<SummaryData>) -> bool {
        let current = self.lock_generation();
        if *current != generation {
            debug!(
                generation = generation,
                current = *current,
                "Dropping stale summarisation result"
            );
            return false;
        }

        let next = match result {
            Ok(data) => {
                info!(
                    generation = generation,
                    sentences = data.sentences.len(),
                    paragraphs = data.paragraphs.len(),
                    "Summary ready"
                );
                LoadState::Ready(Arc::new(data))
            }
            Err(err) => {
                warn!(generation = generation, error = %err, "Summary failed");
                LoadState::Failed(err)
            }
        };
        self.state.send_replace(next);
        true
    }
}

pub struct DataLoader<S: SummarySource> {
    source: Arc<S>,
    shared: Arc<Shared>,
}

impl DataLoader<SummariserApi> {
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        Ok(Self::new(SummariserApi::new(config)?))
    }
}

impl<S: SummarySource> DataLoader<S> {
    pub fn new(source: S) -> Self {
        Self::with_source(Arc::new(source))
    }

    pub fn with_source(source: Arc<S>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            source,
            shared: Arc::new(Shared {
                state,
                generation: Mutex::new(0),
            }),
        }
    }

    pub fn state(&self) -> LoadState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.shared.state.subscribe()
    }

    pub fn generation(&self) -> u64 {
        *self.shared.lock_generation()
    }

    /// Starts loading `document`, superseding any earlier submission. An empty
    /// document fails immediately without contacting the source.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, document: impl Into<String>) -> Submission {
        let document = document.into();

        let generation = {
            let mut current = self.shared.lock_generation();
            *current += 1;
            let next = if document.is_empty() {
                LoadState::Failed(SummaryError::EmptyDocument)
            } else {
                LoadState::Loading
            };
            self.shared.state.send_replace(next);
            *current
        };

        if document.is_empty() {
            warn!(generation = generation, "Empty document submitted");
            return Submission {
                generation,
                task: None,
            };
        }

        let tokens = approximate_tokens(&document);
        if tokens > MAX_PROMPT_TOKENS {
            warn!(
                generation = generation,
                tokens = tokens,
                max_tokens = MAX_PROMPT_TOKENS,
                "Document is likely too long for the summariser"
            );
        }
        info!(generation = generation, document_len = document.len(), "Submitting document");

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            let result = source.fetch(&document).await;
            shared.complete(generation, result);
        });

        Submission {
            generation,
            task: Some(task),
        }
    }

    /// Resolves once the latest submission is Ready or Failed. Returns
    /// immediately when nothing has been submitted.
    pub async fn settled(&self) -> LoadState {
        let mut receiver = self.subscribe();
        match receiver
            .wait_for(|state| !matches!(state, LoadState::Loading))
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }
}
