//! TTL cache for resolved Folio resources.
//!
//! Generic in-memory cache with per-entry expiration and lazy eviction.

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
