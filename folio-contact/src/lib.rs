//! # Folio Contact
//!
//! Field-level validation of contact submissions and their relay through
//! the EmailJS REST API.
//!
//! ```rust
//! use folio_contact::{ContactForm, Field};
//!
//! let form = ContactForm::new("Ada", "ada@example", "Hello there!");
//! let errors = form.validate().unwrap_err();
//! assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod form;
mod relay;

pub use form::{validate_email, ContactForm, Field, FieldErrors};
pub use relay::{EmailRelayClient, EmailRelayConfig, SendReceipt};
