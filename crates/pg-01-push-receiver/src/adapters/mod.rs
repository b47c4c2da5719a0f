//! # Adapters
//!
//! Wire-format translation between raw request bodies and domain entities.

pub mod wire;

pub use wire::WireCodec;
