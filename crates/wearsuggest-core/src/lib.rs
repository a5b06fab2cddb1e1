//! # WearSuggest Core
//!
//! Runtime-agnostic logic for WearSuggest: wardrobe models, the color
//! palette, context filters, the store abstraction, and the outfit
//! assembly engine.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! runtime-specific dependencies. Storage is reached only through the
//! [`store::Store`] trait and randomness only through an injected
//! [`rand::Rng`].
//!
//! ## Pipeline
//!
//! ```text
//! active items ─▶ ContextFilter ─▶ ColorTable::valid_pairs ─▶ OutfitAssembler
//!                                                                 │   ▲
//!                                                                 ▼   │
//!                                                          Store (outfit history)
//! ```

pub mod assembler;
pub mod error;
pub mod filter;
pub mod history;
pub mod models;
pub mod palette;
pub mod store;
pub mod wardrobe;

pub use assembler::{AssemblyPolicy, OutfitAssembler, OutfitRequest, OutfitSuggestion};
pub use error::WardrobeError;
pub use palette::ColorTable;
