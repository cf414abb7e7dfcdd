//! Error types and error handling for the front end.
//!
//! This module defines the errors raised while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for structural, expression and literal failures
//! - Error names and suggestions used when rendering diagnostics

pub mod errors;
