//! Core utilities, configuration, errors, and the shared data model

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_services_configuration};
pub use types::{CatalogCandidate, ChordPage, PageRef, RecognizedTrack, SongIdentity};
