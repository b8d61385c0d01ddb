//! WebSocket handshake control.

pub mod headers;
pub mod server;

use sha1::{Digest, Sha1};

use crate::{
    base64,
    error::{Error, Result},
};

/// Fixed string appended to the client key before hashing (RFC 6455).
pub const WS_GUID: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// Length of a `Sec-WebSocket-Accept` value: the base64 of a SHA-1 digest.
pub const ACCEPT_KEY_LEN: usize = base64::encoded_len(20);

/// Room for the key and the GUID together; longer keys are rejected.
const KEY_SCRATCH_LEN: usize = 64;

/// Derives the `Sec-WebSocket-Accept` value for the raw `request` into `dest`.
///
/// Writes [`ACCEPT_KEY_LEN`] characters followed by a NUL byte and returns the
/// number of characters written. No CRLF is attached.
///
/// # Errors
///
/// - [`Error::HandshakeKeyMissing`] if `Sec-WebSocket-Key` is absent or does
///   not fit next to the GUID in the scratch buffer.
/// - [`Error::EncodingFailed`] if `dest` cannot hold the encoded digest.
pub fn derive_accept_key(request: &[u8], dest: &mut [u8]) -> Result<usize> {
    let mut key = [0u8; KEY_SCRATCH_LEN - WS_GUID.len()];
    let key_len = headers::header_value(request, "Sec-WebSocket-Key", &mut key)
        .map_err(|_| Error::HandshakeKeyMissing)?;

    accept_key_for(&key[..key_len], dest)
}

/// Hashes an already extracted `Sec-WebSocket-Key` and encodes the digest.
pub fn accept_key_for(key: &[u8], dest: &mut [u8]) -> Result<usize> {
    // ... field is constructed by concatenating /key/ ...
    // ... with the string "258EAFA5-E914-47DA-95CA-C5AB0DC85B11" (RFC 6455)
    let mut sha1 = Sha1::default();
    sha1.update(key);
    sha1.update(WS_GUID);
    base64::encode_into(&sha1.finalize(), dest).map_err(|_| Error::EncodingFailed)
}
