//! Prediction history.
//!
//! Every successful prediction is appended twice: to the calling session's
//! in-memory store and to the durable CSV log. The store backs the history
//! view, the filter, and the exports; the log is a write-only audit channel.

pub mod export;
pub mod query;
pub mod record;
pub mod recorder;
pub mod store;


// Re-export common types
pub use query::LocationSelector;
pub use record::PredictionRecord;
pub use recorder::{PredictionLog, RecorderError};
pub use store::SessionRegistry;
