//! Padded base64 encoding into fixed-capacity buffers.

use crate::error::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Length of the padded encoding of `n` input bytes.
#[inline]
pub const fn encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

/// Encodes `input` as padded base64 into `dest` and appends a NUL byte.
///
/// Returns the number of characters written, terminator excluded. Fails with
/// [`Error::BufferTooSmall`] before writing a group that would not fit.
pub fn encode_into(input: &[u8], dest: &mut [u8]) -> Result<usize> {
    let capacity = dest.len();
    let needed = encoded_len(input.len()) + 1;
    let mut written = 0;

    for chunk in input.chunks(3) {
        if capacity - written < 4 {
            return Err(Error::BufferTooSmall { needed, capacity });
        }

        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);

        let group = &mut dest[written..written + 4];
        group[0] = ALPHABET[(b0 >> 2) as usize];
        group[1] = ALPHABET[(((b0 & 0b0000_0011) << 4) | (b1 >> 4)) as usize];
        group[2] = if chunk.len() > 1 {
            ALPHABET[(((b1 & 0b0000_1111) << 2) | (b2 >> 6)) as usize]
        } else {
            b'='
        };
        group[3] = if chunk.len() > 2 {
            ALPHABET[(b2 & 0b0011_1111) as usize]
        } else {
            b'='
        };

        written += 4;
    }

    if written == capacity {
        return Err(Error::BufferTooSmall { needed, capacity });
    }
    dest[written] = 0;

    Ok(written)
}
