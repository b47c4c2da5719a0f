//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the transport calls
//! - **Outbound (Driven)**: the business handler this subsystem calls

pub mod inbound;
pub mod outbound;
