//! # Push Receiver Subsystem (PG-01)
//!
//! Authenticates, decrypts and dispatches platform webhook callbacks, and
//! seals the replies.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): frame codec, entities, configuration
//! - **Ports Layer** (`ports/`): `PushReceiverApi` in, `PushMessageHandler` out
//! - **Adapters** (`adapters/`): XML / JSON wire codec
//! - **Service Layer** (`service.rs`): wires the crypto primitives to the ports
//!
//! ## Security Notes
//!
//! - **Verify before decrypt**: forged input never reaches the handler
//! - **Constant-time compare**: signatures are checked with `subtle`
//! - **No replay protection**: timestamps and nonces are not tracked; callers
//!   must enforce freshness if they need it
//!
//! ## Example
//!
//! ```rust,ignore
//! use pg_01_push_receiver::{PushReceiverApi, PushReceiverService, ReceiverConfig};
//!
//! let config = ReceiverConfig::from_env()?;
//! let service = PushReceiverService::new(config, |account: &str, info: &PushBaseInfo, _: &[u8]| {
//!     tracing::info!(account, event = %info.event, "push");
//!     Ok(Vec::new())
//! });
//! let reply = service.handle_push_with(|name| query.get(name).cloned().unwrap_or_default(), &body)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::WireCodec;
pub use domain::config::{ConfigError, Credentials, ReceiverConfig, WireFormat};
pub use domain::entities::{
    DecryptedFrame, EncryptedBody, InboundAuthParams, PushBaseInfo, PushMode, SecureEnvelope,
    SUCCESS_RESPONSE,
};
pub use domain::errors::{ErrorKind, FrameError, PushError};
pub use domain::frame::{build_frame, parse_frame};
pub use ports::inbound::PushReceiverApi;
pub use ports::outbound::{HandlerError, PushMessageHandler};
pub use service::{generate_nonce, PushReceiverService};
