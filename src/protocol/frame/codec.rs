//! Reassembly of client frames from a byte stream.
//!
//! A frame may arrive split over several reads, or several frames may arrive
//! in one. [`FrameDecoder`] buffers until exactly one complete frame is
//! available and hands it out whole, so [`decode_text`](super::decode_text)
//! always sees a full frame.

mod decode;
pub use decode::FrameDecoder;
