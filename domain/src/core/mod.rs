//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: chat completion models
//! - [`question::Question`]: the business question being analysed
//! - [`error`]: validation errors for untrusted backend responses

pub mod error;
pub mod model;
pub mod question;
pub mod string;
