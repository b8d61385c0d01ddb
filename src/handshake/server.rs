//! Server handshake.

use bytes::{Bytes, BytesMut};
use http::{
    Response as HttpResponse, StatusCode,
    header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use httparse::Status;
use monoio_codec::{Decoded, Decoder};

use super::{ACCEPT_KEY_LEN, derive_accept_key};
use crate::error::{CapacityError, Error, Result};

/// Maximum number of headers parsed from a request.
pub const MAX_HEADERS: usize = 64;

/// Capacity of the buffer the server assembles the handshake response in.
pub const HANDSHAKE_RESPONSE_CAPACITY: usize = 256;

const STATUS_AND_UPGRADE: &[u8] = b"\
    HTTP/1.1 101 Switching Protocols\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Origin: ";
const VERSION_AND_ACCEPT: &[u8] = b"\r\n\
    Sec-WebSocket-Version: 13\r\n\
    Sec-WebSocket-Accept: ";
const END_OF_HEADERS: &[u8] = b"\r\n\r\n";

/// Writes the `101 Switching Protocols` response into `dest`, followed by a
/// NUL byte, and returns its length.
///
/// `origin` is written verbatim on the `Origin:` line.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if the assembled response and its terminator
/// exceed `dest`. The length is computed before anything is written.
pub fn build_response(accept: &[u8], origin: &str, dest: &mut [u8]) -> Result<usize> {
    let pieces = [
        STATUS_AND_UPGRADE,
        origin.as_bytes(),
        VERSION_AND_ACCEPT,
        accept,
        END_OF_HEADERS,
    ];

    let len: usize = pieces.iter().map(|piece| piece.len()).sum();
    if len >= dest.len() {
        return Err(Error::BufferTooSmall {
            needed: len + 1,
            capacity: dest.len(),
        });
    }

    let mut written = 0;
    for piece in pieces {
        dest[written..written + piece.len()].copy_from_slice(piece);
        written += piece.len();
    }
    dest[written] = 0;

    Ok(written)
}

/// Derives the accept value from the raw `request` and writes the complete
/// handshake response into `dest`.
pub fn make_handshake_response(request: &[u8], origin: &str, dest: &mut [u8]) -> Result<usize> {
    let mut accept = [0u8; ACCEPT_KEY_LEN + 1];
    let accept_len = derive_accept_key(request, &mut accept)?;
    build_response(&accept[..accept_len], origin, dest)
}

/// Builds the complete response to a plain resource request.
pub fn resource_response(body: &str) -> Result<Vec<u8>> {
    let resp = HttpResponse::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html")
        .header(CONTENT_LENGTH, body.len())
        .body(body)?;

    let mut buf = generate_response(&resp);
    buf.extend_from_slice(resp.body().as_bytes());
    Ok(buf)
}

fn generate_response<T>(resp: &HttpResponse<T>) -> Vec<u8> {
    let mut buf = format!(
        "{version:?} {status}\r\n",
        version = resp.version(),
        status = resp.status()
    )
    .into_bytes();

    for (k, v) in resp.headers() {
        buf.extend_from_slice(k.as_ref());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_ref());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// A request read off the wire, kept as the raw header block.
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// Request method.
    pub method: String,
    /// Request target.
    pub path: String,
    /// Request line and headers, blank line included.
    pub bytes: Bytes,
}

/// Decoder yielding the raw header block of one request.
///
/// Bytes following the blank line stay in the read buffer.
#[derive(Debug, Clone, Copy)]
pub struct RequestDecoder {
    max_size: usize,
}

impl RequestDecoder {
    /// Creates a decoder failing once `max_size` bytes are buffered without a
    /// complete header block.
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl Decoder for RequestDecoder {
    type Item = RawRequest;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Decoded<Self::Item>, Self::Error> {
        let mut hbuffer = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut req = httparse::Request::new(&mut hbuffer);

        let size = match req.parse(src)? {
            Status::Partial if src.len() >= self.max_size => {
                return Err(Error::Capacity(CapacityError::RequestTooLarge {
                    size: src.len(),
                    max_size: self.max_size,
                }));
            }
            Status::Partial => return Ok(Decoded::Insufficient),
            Status::Complete(size) => size,
        };

        let method = req.method.unwrap_or_default().to_owned();
        let path = req.path.unwrap_or_default().to_owned();
        let bytes = src.split_to(size).freeze();

        Ok(Decoded::Some(RawRequest {
            method,
            path,
            bytes,
        }))
    }
}
