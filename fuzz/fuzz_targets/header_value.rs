#![no_main]

use libfuzzer_sys::fuzz_target;
use monoio_wstext::header_value;

fuzz_target!(|data: &[u8]| {
    let mut dest = [0u8; 28];
    if let Ok(len) = header_value(data, "Sec-WebSocket-Key", &mut dest) {
        assert!(!dest[..len].contains(&b'\r'));
        assert!(!dest[..len].contains(&b'\n'));
        assert_eq!(dest[len], 0);
    }
});
