//! # Ports Layer
//!
//! - **Inbound (Driving)**: API the application calls
//! - **Outbound (Driven)**: session-key exchange with the platform

pub mod inbound;
pub mod outbound;
