//! # Folio Loader
//!
//! Resolves resource identifiers to handles through a shared TTL cache in
//! front of a pluggable [`ResourceFetcher`](folio_core::ResourceFetcher).
//!
//! - [`ResourceLoader`]: `load` / `retry` / `preload`
//! - [`ResourceBinding`]: one resource with an observable lifecycle
//! - [`LazyResource`]: a binding that waits for a visibility signal
//!
//! ## Example
//!
//! ```rust,ignore
//! let cache = Arc::new(TtlCache::new());
//! let loader = ResourceLoader::new(cache, FsFetcher::new("./assets", "/assets"));
//!
//! match loader.load("hero.png", Some("/placeholder.svg")).await {
//!     LoadState::Succeeded { value, .. } => println!("{value}"),
//!     LoadState::Failed { error } => eprintln!("{error}"),
//!     LoadState::Pending => unreachable!(),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod binding;
mod lazy;
mod loader;
mod preload;

#[cfg(test)]
mod testing;

pub use binding::ResourceBinding;
pub use lazy::LazyResource;
pub use loader::ResourceLoader;
