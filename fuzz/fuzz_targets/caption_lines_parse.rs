//! Fuzz target for the caption side-file format.
//!
//! Parsing then rendering must be stable after the first normalization.

#![no_main]

use imgslot::slots::CaptionStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let store = CaptionStore::from_lines(text);
    let rendered = store.to_string();
    assert_eq!(CaptionStore::from_lines(&rendered), store);
});
