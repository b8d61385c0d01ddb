//! WebSocket protocol implementation.

pub mod frame;
