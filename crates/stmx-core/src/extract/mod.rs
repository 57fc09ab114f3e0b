//! Identifier extraction from payment narratives.

mod extractor;
pub mod rules;

pub use extractor::{IdentifierExtractor, NarrativeExtractor};
