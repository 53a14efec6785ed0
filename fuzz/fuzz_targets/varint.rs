#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: LEB128 varint decode, then re-encode what was consumed.
//
// A successful decode must re-encode to at most the bytes it consumed
// (non-canonical inputs with padding continuation bytes re-encode shorter).
fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = sns_wire::varint::decode_varint(data) {
        assert!(consumed <= sns_wire::varint::MAX_VARINT_BYTES);
        let mut buf = Vec::new();
        let written = sns_wire::varint::encode_varint(value, &mut buf);
        assert!(written <= consumed);
    }
});
