#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: schema-less protobuf field walk.
//
// Catches bugs in:
// - Field key decoding and wire type rejection
// - Length prefixes larger than the buffer
// - Fixed32 / fixed64 reads at the end of input
fuzz_target!(|data: &[u8]| {
    if let Ok(fields) = sns_wire::fields::Message::decode(data) {
        for field in &fields {
            assert!(field.number > 0);
            assert!(field.offset < data.len());
        }
    }
});
