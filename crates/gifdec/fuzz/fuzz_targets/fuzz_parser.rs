#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    _ = gifdec::de::Gif::from_bytes(data);
});
