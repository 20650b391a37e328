//! Core building blocks shared by the services.
//!
//! - [`code_generator`] - Secure base62 short code generation
//! - [`input_validator`] - URL and custom code gatekeeping
//! - [`deadline`] - Timeout wrapper for persistence calls

pub mod code_generator;
pub mod deadline;
pub mod input_validator;
