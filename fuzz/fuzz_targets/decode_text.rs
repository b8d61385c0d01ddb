#![no_main]

use libfuzzer_sys::fuzz_target;
use monoio_wstext::decode_text;

fuzz_target!(|data: &[u8]| {
    // Capacity comes from the input too, so every boundary gets exercised.
    let Some((&capacity, frame)) = data.split_first() else {
        return;
    };
    let mut dest = vec![0u8; capacity as usize];
    if let Ok(len) = decode_text(frame, &mut dest) {
        assert!(len < dest.len());
        assert_eq!(dest[len], 0);
    }
});
