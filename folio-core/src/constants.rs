//! Constants shared across the Folio crates.
//!
//! TTLs mirror the site's caching policy: short-lived generic entries,
//! day-long image handles and ten-minute data payloads.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE TTLS
// ═══════════════════════════════════════════════════════════════════════════════

/// TTL applied when a `set` call does not name one (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL for resolved image handles (24 hours).
pub const IMAGE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// TTL for data payloads such as JSON documents (10 minutes).
pub const DATA_TTL: Duration = Duration::from_secs(10 * 60);

// ═══════════════════════════════════════════════════════════════════════════════
// RESOURCE LOADING
// ═══════════════════════════════════════════════════════════════════════════════

/// Prefix prepended to a resource identifier to form its cache key.
pub const RESOURCE_KEY_PREFIX: &str = "resource_";

/// Message reported when a load is attempted without an identifier.
pub const MISSING_RESOURCE_ID_MESSAGE: &str = "No resource identifier provided";

/// File extensions classified as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "avif", "ico"];

/// File extensions classified as data payloads.
pub const DATA_EXTENSIONS: &[&str] = &["json"];

/// Default timeout for HTTP fetches and relays, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Returns the cache key under which a resource's resolved handle is stored.
pub fn resource_cache_key(resource_id: &str) -> String {
    format!("{}{}", RESOURCE_KEY_PREFIX, resource_id)
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTACT FORM VALIDATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Minimum length of the sender's name.
pub const NAME_MIN_LENGTH: usize = 2;

/// Maximum length of the sender's name.
pub const NAME_MAX_LENGTH: usize = 50;

/// Minimum length of a contact message.
pub const MESSAGE_MIN_LENGTH: usize = 10;

/// Maximum length of a contact message.
pub const MESSAGE_MAX_LENGTH: usize = 500;

/// Pattern a contact email must match.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Message for a missing required field.
pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required";

/// Message for a malformed email address.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Template for a value below its minimum length. `{min}` is substituted.
pub const MIN_LENGTH_MESSAGE: &str = "Must contain at least {min} characters";

/// Template for a value above its maximum length. `{max}` is substituted.
pub const MAX_LENGTH_MESSAGE: &str = "Must not exceed {max} characters";

// ═══════════════════════════════════════════════════════════════════════════════
// EMAIL RELAY
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the EmailJS REST API.
pub const EMAILJS_API_URL: &str = "https://api.emailjs.com";

/// Path of the EmailJS send endpoint.
pub const EMAILJS_SEND_PATH: &str = "/api/v1.0/email/send";
