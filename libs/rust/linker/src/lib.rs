//! Links summary sentences back to the paragraphs of the document they were
//! generated from.
//!
//! [`DataLoader`] fetches sentences, paragraphs and their embeddings from the
//! summarisation service, [`similarity`] scores paragraphs against a sentence,
//! and [`SelectionController`] ties the two together for a presenter.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod selection;
pub mod similarity;
pub mod source;

pub use config::{LinkerConfig, ServiceConfig, load_config};
pub use error::{Result, SummaryError};
pub use loader::{DataLoader, LoadState, StatusView, Submission};
pub use models::{Embedding, Paragraph, Sentence, SummaryData};
pub use selection::SelectionController;
pub use similarity::{dot, normalize_unit_interval, paragraph_similarities, raw_similarities};
pub use source::{SummariserApi, SummarySource, approximate_tokens};
