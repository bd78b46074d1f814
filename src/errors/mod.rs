//! Error types and error handling for the compiler front end.
//!
//! This module defines the error types used by every phase. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and analysis
//! - The closed error taxonomy (`ErrorKind`) callers can match on
//! - Helpful error messages and suggestions

pub mod errors;
