//! Minimal WebSocket upgrade server for the [`monoio`](https://github.com/bytedance/monoio)
//! runtime.
//!
//! The core is a codec working on caller-provided fixed-capacity buffers:
//! deriving `Sec-WebSocket-Accept` from a raw request, and unmasking client
//! frames into NUL-terminated text. The [`server`] module wraps it in an
//! accept loop that serves one task per connection.

#![deny(
    missing_docs,
    unused_must_use,
    unused_mut,
    unused_imports,
    unused_import_braces
)]

pub mod base64;
pub mod config;
pub mod error;
pub use error::{Error, Result};

pub mod protocol;

#[cfg(feature = "handshake")]
pub mod handshake;
#[cfg(feature = "handshake")]
pub mod server;

// re-export bytes since used in `RawRequest`.
pub use bytes::Bytes;

pub use crate::{
    config::ServerConfig,
    protocol::frame::{DecodedText, FrameHeader, decode_text},
};
#[cfg(feature = "handshake")]
pub use crate::{
    handshake::{
        derive_accept_key,
        headers::{header_value, is_upgrade_request},
        server::{build_response, make_handshake_response},
    },
    server::{Callback, LogText, handle_connection, serve},
};
