//! # canon-core
//!
//! Core types, traits, and abstractions for the canonweave reconciliation
//! engine.
//!
//! This crate provides the foundational data structures and trait definitions
//! that other canonweave crates depend on.

pub mod context;
pub mod defaults;
pub mod error;
pub mod identity;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod similarity;
pub mod traits;

// Re-export commonly used types at crate root
pub use context::{infer_context_type, ContextKeywords};
pub use error::{Error, Result};
pub use identity::entity_id;
pub use models::*;
pub use normalize::normalize_name;
pub use similarity::{levenshtein_distance, name_similarity};
pub use traits::*;
