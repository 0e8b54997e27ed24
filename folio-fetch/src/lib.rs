//! Resource fetchers for the Folio loader.
//!
//! Resolves asset identifiers against a local asset directory or a remote
//! asset host.

mod fs;
mod http;

pub use fs::FsFetcher;
pub use http::{HttpFetcher, HttpFetcherConfig};
