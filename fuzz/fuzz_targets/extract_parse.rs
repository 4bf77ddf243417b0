//! Fuzz target for embedded-reference extraction.

#![no_main]

use imgslot::extract::fuzz_extract;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_extract(text);
});
