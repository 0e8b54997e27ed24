//! Domain types for Folio.
//!
//! - [`LoadState`]: Three-state lifecycle of a single load attempt
//! - [`ResourceClass`]: Resource category that selects a cache TTL
//! - [`PreloadReport`]: Aggregate outcome of a batch preload

mod load;
mod preload;
mod resource;

pub use load::*;
pub use preload::*;
pub use resource::*;
