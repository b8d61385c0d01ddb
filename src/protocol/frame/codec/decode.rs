use bytes::{Bytes, BytesMut};
use monoio_codec::{Decoded, Decoder};

use crate::{error::Error, protocol::frame::FrameHeader};

/// Upper bound on a single read-buffer reservation while a frame is pending.
///
/// The buffer grows with the bytes that actually arrive, never with the
/// length a peer merely declares.
const RESERVE_CHUNK: usize = 64 << 10;

/// Decoder splitting a read buffer into complete WebSocket frames.
///
/// Each item is one frame, header included, still masked.
#[derive(Debug, Clone, Copy)]
pub struct FrameDecoder {
    max_frame_size: Option<usize>,
}

impl FrameDecoder {
    /// Creates a decoder rejecting payloads larger than `max_frame_size`.
    pub fn new(max_frame_size: Option<usize>) -> Self {
        Self { max_frame_size }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(Some(64 << 10))
    }
}

impl Decoder for FrameDecoder {
    type Item = Bytes;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Decoded<Self::Item>, Self::Error> {
        let Some((header, header_len)) = FrameHeader::parse(src) else {
            return Ok(Decoded::Insufficient);
        };

        let needed = (header_len as u64).saturating_add(header.payload_len);
        if let Some(max_frame_size) = self.max_frame_size
            && header.payload_len > max_frame_size as u64
        {
            return Err(Error::FrameTooLargeForBuffer {
                needed,
                available: header_len.saturating_add(max_frame_size),
            });
        }

        // Bounded by `max_frame_size` above, or by the address space otherwise.
        let frame_len = usize::try_from(needed).map_err(|_| Error::FrameTooLargeForBuffer {
            needed,
            available: usize::MAX,
        })?;

        if src.len() < frame_len {
            src.reserve((frame_len - src.len()).min(RESERVE_CHUNK));
            return Ok(Decoded::Insufficient);
        }

        Ok(Decoded::Some(src.split_to(frame_len).freeze()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: [u8; 11] = [
        0x81, 0x85, 1, 2, 3, 4, b'h' ^ 1, b'e' ^ 2, b'l' ^ 3, b'l' ^ 4, b'o' ^ 1,
    ];

    #[test]
    fn waits_for_complete_frame() {
        let mut decoder = FrameDecoder::default();
        let mut buf = BytesMut::new();

        for split in 0..HELLO.len() {
            buf.clear();
            buf.extend_from_slice(&HELLO[..split]);
            assert!(matches!(decoder.decode(&mut buf), Ok(Decoded::Insufficient)));
            assert_eq!(buf.len(), split);
        }

        buf.extend_from_slice(&HELLO[HELLO.len() - 1..]);
        match decoder.decode(&mut buf) {
            Ok(Decoded::Some(frame)) => assert_eq!(&frame[..], &HELLO[..]),
            _ => panic!("expected a complete frame"),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn splits_back_to_back_frames() {
        let close = [0x88, 0x80, 0, 0, 0, 0];
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&HELLO);
        buf.extend_from_slice(&close);

        let mut decoder = FrameDecoder::default();
        let Ok(Decoded::Some(first)) = decoder.decode(&mut buf) else {
            panic!("expected first frame");
        };
        let Ok(Decoded::Some(second)) = decoder.decode(&mut buf) else {
            panic!("expected second frame");
        };
        assert_eq!(&first[..], &HELLO[..]);
        assert_eq!(&second[..], &close[..]);
        assert!(buf.is_empty());
    }

    #[test]
    fn rejects_oversized_payload_before_buffering() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x81, 0xFE, 0x01, 0x00, 1, 2, 3, 4]);

        let mut decoder = FrameDecoder::new(Some(255));
        assert!(matches!(
            decoder.decode(&mut buf),
            Err(Error::FrameTooLargeForBuffer {
                needed: 264,
                available: 263
            })
        ));
    }

    #[test]
    fn unlimited_decoder_does_not_reserve_declared_length() {
        let mut decoder = FrameDecoder::new(None);

        for declared in [1u64 << 63, 1 << 40, u64::MAX - 14, u64::MAX] {
            let mut buf = BytesMut::new();
            buf.extend_from_slice(&[0x81, 0xFF]);
            buf.extend_from_slice(&declared.to_be_bytes());
            buf.extend_from_slice(&[1, 2, 3, 4]);

            match decoder.decode(&mut buf) {
                Ok(Decoded::Insufficient) => {
                    assert_eq!(buf.len(), 14);
                    assert!(buf.capacity() <= 14 + RESERVE_CHUNK * 2);
                }
                Err(Error::FrameTooLargeForBuffer { .. }) => {}
                _ => panic!("declared length {declared}: unexpected result"),
            }
        }
    }
}
