//! Application layer services implementing business logic.
//!
//! Services consume the repository trait and the validation and generation
//! collaborators, and give the HTTP handlers and the admin CLI one API.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Create, resolve, update, delete and stats
//! - [`services::code_resolver::CodeResolver`] - Custom code checks and unique code generation

pub mod services;
