//! # Domain Layer
//!
//! Phone request and record types. No I/O.

pub mod entities;
pub mod errors;
