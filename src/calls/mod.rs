//! Call record structures, CSV loading, and synthetic samples

mod data;
pub mod cache;
pub mod generator;
pub mod loader;

pub use data::{CallRecord, ANSWER, BUSY, NO_ANSWER};
pub use cache::DatasetCache;
pub use generator::{generate_sample, default_sample, SampleParams};
pub use loader::{load_calls, load_calls_from_reader, LoadMode};
