//! Locating header values in a raw request without parsing it into a map.

use crate::error::{Error, Result};

/// Line the dispatch layer looks for to route a request to the handshake.
pub const UPGRADE_LINE: &[u8] = b"Upgrade: websocket";

/// Copies the value of the first `"<name>: "` occurrence in `request` into
/// `dest` and appends a NUL byte.
///
/// The match is case-sensitive. The value runs up to, not including, the next
/// `\r`. Returns the value length.
///
/// # Errors
///
/// - [`Error::HeaderNotFound`] if the name does not occur, or if the line
///   ends without `\r` (at a bare `\n` or at the end of `request`).
/// - [`Error::BufferTooSmall`] if the value and its terminator do not fit.
///   Nothing is written in that case.
pub fn header_value(request: &[u8], name: &str, dest: &mut [u8]) -> Result<usize> {
    let start = value_start(request, name.as_bytes()).ok_or(Error::HeaderNotFound)?;
    let rest = &request[start..];

    let end = rest
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .ok_or(Error::HeaderNotFound)?;
    if rest[end] != b'\r' {
        return Err(Error::HeaderNotFound);
    }

    let value = &rest[..end];
    if value.len() >= dest.len() {
        return Err(Error::BufferTooSmall {
            needed: value.len() + 1,
            capacity: dest.len(),
        });
    }

    dest[..value.len()].copy_from_slice(value);
    dest[value.len()] = 0;

    Ok(value.len())
}

/// Tells whether `request` asks for a WebSocket upgrade.
///
/// This is a case-sensitive substring test for [`UPGRADE_LINE`], not a header
/// lookup.
pub fn is_upgrade_request(request: &[u8]) -> bool {
    find(request, UPGRADE_LINE).is_some()
}

/// Offset of the first byte after `"<name>: "`.
fn value_start(request: &[u8], name: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = find(&request[from..], name) {
        let after = from + pos + name.len();
        if request[after..].starts_with(b": ") {
            return Some(after + 2);
        }
        from += pos + 1;
    }
    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
