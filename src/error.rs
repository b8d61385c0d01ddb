//! Error handling.

use std::{io, result};

use thiserror::Error;

/// Result type of all library calls.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Possible codec and server errors.
///
/// Every variant is local to one call or one connection. None of them is
/// retried: the server drops the offending connection and keeps accepting.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested header does not occur in the request, or its line is not
    /// terminated by `\r`.
    #[error("Header not found")]
    HeaderNotFound,
    /// The destination buffer cannot hold the output plus its NUL terminator.
    /// Nothing written to the destination may be consumed.
    #[error("Buffer too small: {needed} bytes needed, capacity is {capacity}")]
    BufferTooSmall {
        /// Bytes required, terminator included.
        needed: usize,
        /// Capacity of the destination.
        capacity: usize,
    },
    /// The request carries no usable `Sec-WebSocket-Key` header.
    #[error("Missing or oversized Sec-WebSocket-Key header")]
    HandshakeKeyMissing,
    /// The accept digest could not be base64 encoded into the destination.
    #[error("Failed to encode Sec-WebSocket-Accept value")]
    EncodingFailed,
    /// A frame declares more bytes than the buffer holding it can provide.
    #[error("Frame needs {needed} bytes but only {available} are available")]
    FrameTooLargeForBuffer {
        /// Bytes the frame claims, header included.
        needed: u64,
        /// Bytes actually available.
        available: usize,
    },
    /// Input-output error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Buffer limit of the connection layer exceeded.
    #[error("Space limit exceeded: {0}")]
    Capacity(#[from] CapacityError),
    /// Protocol violation.
    #[error("WebSocket protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// The request could not be parsed as HTTP.
    #[cfg(feature = "handshake")]
    #[error("HTTP parse error: {0}")]
    HttpFormat(#[from] httparse::Error),
    /// The resource response could not be assembled.
    #[cfg(feature = "handshake")]
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),
}

/// Indicates the specific type/cause of a capacity error.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CapacityError {
    /// The request header block did not end within the read limit.
    #[error("Request too large: {size} > {max_size}")]
    RequestTooLarge {
        /// Bytes buffered so far.
        size: usize,
        /// Configured limit.
        max_size: usize,
    },
}

/// Indicates the specific type/cause of a protocol error.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProtocolError {
    /// The client sent a frame without the MASK bit.
    #[error("Received an unmasked frame from client")]
    UnmaskedFrameFromClient,
    /// The peer closed the socket before sending a full request.
    #[error("Handshake not finished")]
    HandshakeIncomplete,
}
