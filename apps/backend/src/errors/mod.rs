//! Error handling for the league market backend.

pub mod domain;
pub mod error_code;
pub mod resolution;

#[cfg(test)]
mod tests_error_mapping;

pub use domain::DomainError;
pub use error_code::ErrorCode;
pub use resolution::ResolutionError;
