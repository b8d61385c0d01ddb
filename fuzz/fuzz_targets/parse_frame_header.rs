#![no_main]

use libfuzzer_sys::fuzz_target;
use monoio_wstext::protocol::frame::FrameHeader;

fuzz_target!(|data: &[u8]| {
    if let Some((_, len)) = FrameHeader::parse(data) {
        assert!(len <= data.len());
        assert_eq!(len, FrameHeader::required_len(data));
    }
});
