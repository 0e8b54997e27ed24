//! # Folio Core
//!
//! Core types, errors, and traits shared by the Folio crates.
//!
//! This crate provides the foundational building blocks used by the cache,
//! the resource loader, the fetch collaborators and the contact relay:
//!
//! - **Types**: Load lifecycle state, resource classes and preload reports
//! - **Errors**: A single error taxonomy with context
//! - **Constants**: TTLs, cache key prefixes and form validation limits
//! - **Traits**: The [`ResourceFetcher`] seam the loader is built on
//!
//! ## Example
//!
//! ```rust
//! use folio_core::{LoadState, ResourceClass};
//!
//! let state: LoadState<String> = LoadState::Pending;
//! assert!(state.is_pending());
//! assert_eq!(ResourceClass::from_resource_id("hero.png"), ResourceClass::Image);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FolioError, Result};
pub use traits::*;
pub use types::*;
