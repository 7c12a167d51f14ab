//! Akkordy - Telegram bot that recognizes a song and finds its chords
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and the shared data model
//! - `identity`: turning a recognized (artist, title) into catalog spellings
//! - `chords`: catalog scraping, chord-sheet cleanup and performance tips
//! - `recognition`: audio fingerprint lookup
//! - `pipeline`: one request end to end
//! - `telegram`: Telegram bot integration and handlers

pub mod chords;
pub mod cli;
pub mod core;
pub mod identity;
pub mod pipeline;
pub mod recognition;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use pipeline::{ChordFinder, ChordOutcome};
