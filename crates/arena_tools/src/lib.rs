//! # Arena Development Tools
//!
//! Command-line tools for development:
//! - Map set loading and validation
//! - ASCII and JSON map previews

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod preview;
pub mod validate;
