#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: favorite_detail decoder.
//
// Catches bugs in:
// - Length bytes running past the end of the buffer
// - Tag checks at every entry boundary
// - Short headers and short trailers at the end of input
fuzz_target!(|data: &[u8]| {
    if let Ok(entries) = sns_types::decode_favorite_list(data) {
        // Each entry needs at least header + two tags + two lengths.
        assert!(entries.len() * 13 <= data.len());
    }
});
