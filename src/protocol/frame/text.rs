use std::fmt;

use super::{frame::FrameHeader, mask::unmask_into};
use crate::error::{Error, ProtocolError, Result};

/// Decodes the complete client frame at the start of `frame` into `dest`.
///
/// The payload is unmasked into `dest` and followed by a NUL byte; the return
/// value is the payload length. The opcode is not interpreted, so callers
/// detect close frames themselves before decoding.
///
/// # Errors
///
/// - [`ProtocolError::UnmaskedFrameFromClient`] if the MASK bit is clear.
/// - [`Error::BufferTooSmall`] if the payload does not fit in `dest` with one
///   byte left for the terminator. Nothing is written in that case.
/// - [`Error::FrameTooLargeForBuffer`] if `frame` ends before the header or
///   the declared payload does.
pub fn decode_text(frame: &[u8], dest: &mut [u8]) -> Result<usize> {
    decode(frame, dest, false)
}

/// Like [`decode_text`], but copies the payload of unmasked frames unchanged.
///
/// RFC 6455 requires servers to reject unmasked client frames; this exists for
/// peers known to ignore that rule.
pub fn decode_text_lenient(frame: &[u8], dest: &mut [u8]) -> Result<usize> {
    decode(frame, dest, true)
}

fn decode(frame: &[u8], dest: &mut [u8], accept_unmasked: bool) -> Result<usize> {
    let (header, header_len) =
        FrameHeader::parse(frame).ok_or_else(|| Error::FrameTooLargeForBuffer {
            needed: FrameHeader::required_len(frame) as u64,
            available: frame.len(),
        })?;

    if header.mask.is_none() && !accept_unmasked {
        return Err(Error::Protocol(ProtocolError::UnmaskedFrameFromClient));
    }

    let capacity = dest.len();
    // One byte stays reserved for the terminator.
    let len = match usize::try_from(header.payload_len) {
        Ok(len) if len < capacity => len,
        _ => {
            return Err(Error::BufferTooSmall {
                needed: usize::try_from(header.payload_len)
                    .unwrap_or(usize::MAX)
                    .saturating_add(1),
                capacity,
            });
        }
    };

    let payload = &frame[header_len..];
    if payload.len() < len {
        return Err(Error::FrameTooLargeForBuffer {
            needed: (header_len as u64).saturating_add(header.payload_len),
            available: frame.len(),
        });
    }

    let payload = &payload[..len];
    match header.mask {
        Some(mask) => unmask_into(payload, mask, &mut dest[..len]),
        None => dest[..len].copy_from_slice(payload),
    }
    dest[len] = 0;

    Ok(len)
}

/// Text decoded from one client frame.
///
/// WebSocket text frames must carry UTF-8, but the decoder does not enforce
/// it; [`DecodedText::to_str`] validates on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedText<'a>(&'a [u8]);

impl<'a> DecodedText<'a> {
    /// Wraps a decoded payload.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    /// Returns the raw payload bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Returns the payload as `&str` if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, simdutf8::basic::Utf8Error> {
        simdutf8::basic::from_utf8(self.0)
    }

    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Tells whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DecodedText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Ok(text) => f.write_str(text),
            Err(_) => f.write_str(&String::from_utf8_lossy(self.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked_frame(first: u8, payload: &[u8], mask: [u8; 4]) -> Vec<u8> {
        let mut frame = vec![first];
        match payload.len() {
            len @ 0..=125 => frame.push(0x80 | len as u8),
            len @ 126..=0xFFFF => {
                frame.push(0x80 | 126);
                frame.extend_from_slice(&(len as u16).to_be_bytes());
            }
            len => {
                frame.push(0x80 | 127);
                frame.extend_from_slice(&(len as u64).to_be_bytes());
            }
        }
        frame.extend_from_slice(&mask);
        frame.extend(payload.iter().enumerate().map(|(i, b)| b ^ mask[i % 4]));
        frame
    }

    #[test]
    fn decode_hello() {
        let frame = [
            0x81,
            0x85,
            1,
            2,
            3,
            4,
            b'h' ^ 1,
            b'e' ^ 2,
            b'l' ^ 3,
            b'l' ^ 4,
            b'o' ^ 1,
        ];
        let mut dest = [0xFFu8; 16];
        let len = decode_text(&frame, &mut dest).unwrap();
        assert_eq!(&dest[..len], b"hello");
        assert_eq!(dest[len], 0);
    }

    #[test]
    fn decode_extended_16_length() {
        let payload: Vec<u8> = (0..300u32).map(|i| b'a' + (i % 26) as u8).collect();
        let frame = masked_frame(0x81, &payload, [0x37, 0xfa, 0x21, 0x3d]);
        assert_eq!(frame[1] & 0x7F, 126);

        let mut dest = vec![0u8; 499];
        let len = decode_text(&frame, &mut dest).unwrap();
        assert_eq!(len, 300);
        assert_eq!(&dest[..len], &payload[..]);
    }

    #[test]
    fn decode_extended_64_length() {
        let payload = b"sixty-four bit length form";
        let mask = [9, 8, 7, 6];
        let mut frame = vec![0x81, 0x80 | 127];
        frame.extend_from_slice(&(payload.len() as u64).to_be_bytes());
        frame.extend_from_slice(&mask);
        frame.extend(payload.iter().enumerate().map(|(i, b)| b ^ mask[i % 4]));

        let mut dest = [0u8; 64];
        let len = decode_text(&frame, &mut dest).unwrap();
        assert_eq!(&dest[..len], payload);
    }

    #[test]
    fn decode_empty_payload() {
        let frame = masked_frame(0x81, b"", [1, 2, 3, 4]);
        let mut dest = [0xFFu8; 1];
        assert_eq!(decode_text(&frame, &mut dest).unwrap(), 0);
        assert_eq!(dest, [0]);
    }

    #[test]
    fn small_destinations_fail_without_writing() {
        let payload = b"boundary check";
        let frame = masked_frame(0x81, payload, [0xde, 0xad, 0xbe, 0xef]);

        for capacity in 0..=payload.len() {
            let mut dest = vec![0x5Au8; capacity];
            match decode_text(&frame, &mut dest) {
                Err(Error::BufferTooSmall { needed, capacity: c }) => {
                    assert_eq!(needed, payload.len() + 1);
                    assert_eq!(c, capacity);
                }
                other => panic!("capacity {capacity}: unexpected {other:?}"),
            }
            assert!(dest.iter().all(|&b| b == 0x5A));
        }

        let mut dest = vec![0u8; payload.len() + 1];
        assert_eq!(decode_text(&frame, &mut dest).unwrap(), payload.len());
    }

    #[test]
    fn huge_declared_length_is_buffer_too_small() {
        let mut frame = vec![0x81, 0xFF];
        frame.extend_from_slice(&u64::MAX.to_be_bytes());
        frame.extend_from_slice(&[1, 2, 3, 4]);
        let mut dest = [0u8; 499];
        assert!(matches!(
            decode_text(&frame, &mut dest),
            Err(Error::BufferTooSmall { capacity: 499, .. })
        ));
    }

    #[test]
    fn truncated_frames() {
        let mut dest = [0u8; 64];
        assert!(matches!(
            decode_text(&[0x81], &mut dest),
            Err(Error::FrameTooLargeForBuffer {
                needed: 2,
                available: 1
            })
        ));
        assert!(matches!(
            decode_text(&[0x81, 0x85, 1, 2], &mut dest),
            Err(Error::FrameTooLargeForBuffer {
                needed: 6,
                available: 4
            })
        ));

        let frame = masked_frame(0x81, b"hello", [1, 2, 3, 4]);
        assert!(matches!(
            decode_text(&frame[..frame.len() - 1], &mut dest),
            Err(Error::FrameTooLargeForBuffer {
                needed: 11,
                available: 10
            })
        ));
    }

    #[test]
    fn unmasked_frames() {
        let frame = [0x81, 0x02, b'h', b'i'];
        let mut dest = [0u8; 8];
        assert!(matches!(
            decode_text(&frame, &mut dest),
            Err(Error::Protocol(ProtocolError::UnmaskedFrameFromClient))
        ));

        let len = decode_text_lenient(&frame, &mut dest).unwrap();
        assert_eq!(&dest[..len], b"hi");
    }

    #[test]
    fn random_masks_round_trip() {
        for _ in 0..64 {
            let mask: [u8; 4] = rand::random();
            let len = rand::random_range(0..400usize);
            let payload: Vec<u8> = (0..len).map(|_| rand::random()).collect();
            let frame = masked_frame(0x82, &payload, mask);

            let mut dest = vec![0u8; 401];
            let n = decode_text(&frame, &mut dest).unwrap();
            assert_eq!(&dest[..n], &payload[..]);
        }
    }

    #[test]
    fn decoded_text_display() {
        assert_eq!(DecodedText::new(b"hello").to_string(), "hello");
        assert_eq!(DecodedText::new(b"hi\xFF").to_string(), "hi\u{FFFD}");
        assert!(DecodedText::new(b"hi\xFF").to_str().is_err());
        assert!(DecodedText::new(b"").is_empty());
    }
}
