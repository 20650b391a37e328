//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod shorten;
pub mod urls;

pub use health::health_handler;
pub use shorten::create_url_handler;
pub use urls::{delete_url_handler, get_url_handler, update_url_handler, url_stats_handler};
