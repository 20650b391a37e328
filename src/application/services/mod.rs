//! Business logic services for the application layer.

pub mod code_resolver;
pub mod url_service;

pub use code_resolver::CodeResolver;
pub use url_service::UrlService;
