//! Various codes defined in RFC 6455.

/// WebSocket message opcode as in RFC 6455.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpCode {
    /// Data (text or binary).
    Data(Data),
    /// Control message (close, ping, pong).
    Control(Control),
}

/// Data opcodes as in RFC 6455
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Data {
    /// 0x0 denotes a continuation frame
    Continue,
    /// 0x1 denotes a text frame
    Text,
    /// 0x2 denotes a binary frame
    Binary,
    /// 0x3-7 are reserved for further non-control frames
    Reserved(u8),
}

/// Control opcodes as in RFC 6455
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Control {
    /// 0x8 denotes a connection close
    Close,
    /// 0x9 denotes a ping
    Ping,
    /// 0xa denotes a pong
    Pong,
    /// 0xb-f are reserved for further control frames
    Reserved(u8),
}

impl OpCode {
    /// Reads the opcode from the low four bits of the first frame byte.
    #[inline]
    pub fn from_first_byte(byte: u8) -> Self {
        Self::from(byte & 0x0F)
    }

    /// Tells whether the peer is asking to terminate the connection.
    #[inline]
    pub fn is_close(self) -> bool {
        matches!(self, OpCode::Control(Control::Close))
    }
}

/// Only the low four bits are significant; the rest of the byte is ignored.
impl From<u8> for OpCode {
    fn from(byte: u8) -> OpCode {
        use self::{
            Control::{Close, Ping, Pong},
            Data::{Binary, Continue, Text},
        };
        match byte & 0x0F {
            0 => OpCode::Data(Continue),
            1 => OpCode::Data(Text),
            2 => OpCode::Data(Binary),
            i @ 3..=7 => OpCode::Data(self::Data::Reserved(i)),
            8 => OpCode::Control(Close),
            9 => OpCode::Control(Ping),
            10 => OpCode::Control(Pong),
            i => OpCode::Control(self::Control::Reserved(i)),
        }
    }
}
