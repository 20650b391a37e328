//! Core domain entities.
//!
//! - [`ShortUrl`] - A stored short code to URL mapping
//! - [`NewShortUrl`] - Input for creating a mapping

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl};
