//! Utilities to work with raw WebSocket frames.

pub mod coding;

pub mod codec;
#[allow(clippy::module_inception)]
mod frame;
mod mask;
mod text;

pub use frame::{FrameHeader, LengthFormat};
pub use mask::unmask_into;
pub use text::{DecodedText, decode_text, decode_text_lenient};
