//! # Domain Layer
//!
//! Frame codec, envelope entities and configuration. No I/O.

pub mod config;
pub mod entities;
pub mod errors;
pub mod frame;

pub use config::{ConfigError, Credentials, ReceiverConfig, WireFormat};
pub use entities::{
    DecryptedFrame, EncryptedBody, InboundAuthParams, PushBaseInfo, PushMode, SecureEnvelope,
    SUCCESS_RESPONSE,
};
pub use errors::{ErrorKind, FrameError, PushError};
pub use frame::{build_frame, parse_frame};
