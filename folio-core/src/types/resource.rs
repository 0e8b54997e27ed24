//! Resource classification.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DATA_EXTENSIONS, IMAGE_EXTENSIONS};

/// Category of a resource, used to pick its cache TTL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceClass {
    /// Raster or vector images
    Image,
    /// Structured data payloads (JSON)
    Data,
    /// Anything else; cached with the default TTL
    Other,
}

impl ResourceClass {
    /// Classifies a resource identifier by its file extension.
    ///
    /// Query strings and fragments are ignored, and matching is
    /// case-insensitive.
    pub fn from_resource_id(resource_id: &str) -> Self {
        let path = resource_id
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) else {
            return ResourceClass::Other;
        };
        let ext = ext.to_ascii_lowercase();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            ResourceClass::Image
        } else if DATA_EXTENSIONS.contains(&ext.as_str()) {
            ResourceClass::Data
        } else {
            ResourceClass::Other
        }
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceClass::Image => write!(f, "image"),
            ResourceClass::Data => write!(f, "data"),
            ResourceClass::Other => write!(f, "other"),
        }
    }
}
