//! Song identity resolution across Latin and Cyrillic spellings

pub mod aliases;
pub mod cascade;
pub mod matcher;
pub mod prepare;
pub mod script;
pub mod translate;
pub mod translit;

// Re-exports for convenience
pub use aliases::lookup_alias;
pub use cascade::{plan, strip_parentheses, ResolvedChords, Resolver, Step, Term};
pub use matcher::{pick, Match, MatchTier};
pub use prepare::prepare_identity;
pub use script::{classify, is_likely_translit, TranslitSignal};
pub use translate::{GoogleTranslator, Translator};
pub use translit::{convert_to_russian, improved_convert_to_russian, reapply_case};
