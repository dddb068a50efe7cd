//! HTTP collaborators for pricing runs: the category classifier and the
//! commission document fetcher.

pub mod classifier;
pub mod document;
pub mod error;
mod retry;

pub use classifier::OpenAiClassifier;
pub use document::{split_rows, DocumentClient};
pub use error::RemoteError;
