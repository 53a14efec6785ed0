#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full record decode with the default field numbering.
//
// Exercises the protobuf walk, string validation, and the favorite list
// decoder on whatever favorite_detail the input happens to carry.
fuzz_target!(|data: &[u8]| {
    let fields = sns_types::TimelineFields::default();
    let _ = sns_types::MomentRecord::decode(0, data, &fields);
});
