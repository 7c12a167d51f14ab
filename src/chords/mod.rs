//! Chord catalog access, sheet cleanup and performance tips

pub mod catalog;
pub mod sheet;
pub mod tips;

// Re-exports for convenience
pub use catalog::{AmdmCatalog, Catalog};
pub use sheet::{chords_in_order, normalize_chord_sheet};
pub use tips::{tips_or_apology, DisabledTips, MistralTips, TipGenerator};
