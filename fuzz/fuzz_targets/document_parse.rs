//! Fuzz target for tag parsing and renumbering.
//!
//! Any UTF-8 text must parse, render back unchanged and renumber into a
//! contiguous sequence.

#![no_main]

use imgslot::renumber::fuzz_renumber;
use imgslot::slots::TaggedDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    assert_eq!(TaggedDocument::parse(text).to_string(), text);
    fuzz_renumber(text);
});
