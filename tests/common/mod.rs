//! Common test utilities
//!
//! This module is shared across all integration tests

#[allow(dead_code)]
pub mod fakes;
#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use fakes::{FakeCatalog, FakeRecognizer, FakeTips, FakeTranslator};
#[allow(unused_imports)]
pub use fixtures::{candidate, chord_page, track};
