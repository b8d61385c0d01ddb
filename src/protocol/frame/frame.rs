use super::coding::OpCode;

/// A struct representing a WebSocket frame header as it appears on the wire.
#[allow(missing_copy_implementations)]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FrameHeader {
    /// Indicates that the frame is the last one of a possibly fragmented message.
    pub is_final: bool,
    /// Reserved for protocol extensions.
    pub rsv1: bool,
    /// Reserved for protocol extensions.
    pub rsv2: bool,
    /// Reserved for protocol extensions.
    pub rsv3: bool,
    /// WebSocket protocol opcode.
    pub opcode: OpCode,
    /// A frame mask, if the MASK bit is set.
    pub mask: Option<[u8; 4]>,
    /// True payload length, after resolving the extended length forms.
    pub payload_len: u64,
}

impl FrameHeader {
    /// Number of header bytes implied by the first two bytes of `buf`.
    ///
    /// Returns the two-byte minimum while those are not yet available.
    pub fn required_len(buf: &[u8]) -> usize {
        let Some(&second) = buf.get(1) else {
            return 2;
        };
        let mask_len = if second & 0x80 != 0 { 4 } else { 0 };
        2 + LengthFormat::for_byte(second).extra_bytes() + mask_len
    }

    /// Parses the header at the start of `buf`.
    ///
    /// Returns the header and its length in bytes, or `None` when `buf` ends
    /// before the header does.
    pub fn parse(buf: &[u8]) -> Option<(Self, usize)> {
        let header_len = Self::required_len(buf);
        if buf.len() < header_len {
            return None;
        }

        let (first, second) = (buf[0], buf[1]);
        let is_final = first & 0x80 != 0;
        let rsv1 = first & 0x40 != 0;
        let rsv2 = first & 0x20 != 0;
        let rsv3 = first & 0x10 != 0;
        let opcode = OpCode::from_first_byte(first);
        let masked = second & 0x80 != 0;

        let (payload_len, offset) = match LengthFormat::for_byte(second) {
            LengthFormat::U8(len) => (u64::from(len), 2),
            LengthFormat::U16 => (u64::from(u16::from_be_bytes([buf[2], buf[3]])), 4),
            LengthFormat::U64 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&buf[2..10]);
                (u64::from_be_bytes(raw), 10)
            }
        };

        let mask = masked.then(|| [buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]]);

        let header = FrameHeader {
            is_final,
            rsv1,
            rsv2,
            rsv3,
            opcode,
            mask,
            payload_len,
        };

        Some((header, header_len))
    }
}

/// Handling of the 7-bit payload length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthFormat {
    /// The field is the length itself (0-125).
    U8(u8),
    /// A big-endian `u16` follows.
    U16,
    /// A big-endian `u64` follows.
    U64,
}

impl LengthFormat {
    /// Get the length format from the second header byte.
    #[inline]
    pub fn for_byte(byte: u8) -> Self {
        match byte & 0x7F {
            126 => LengthFormat::U16,
            127 => LengthFormat::U64,
            b => LengthFormat::U8(b),
        }
    }

    /// Get the size of the extended length field.
    #[inline]
    pub fn extra_bytes(&self) -> usize {
        match *self {
            LengthFormat::U8(_) => 0,
            LengthFormat::U16 => 2,
            LengthFormat::U64 => 8,
        }
    }
}
