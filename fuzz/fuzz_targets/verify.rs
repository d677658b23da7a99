#![no_main]

use libfuzzer_sys::fuzz_target;
use stark_curve::{FieldElement, verify};

fuzz_target!(|data: [[u8; 32]; 5]| {
    let [msg_hash, r, s, x, y] = data.map(|bytes| FieldElement::from_bytes_be_reduced(&bytes));

    // Must never panic, whatever the input.
    let _ = verify(&msg_hash, &r, &s, &x, &y);
});
