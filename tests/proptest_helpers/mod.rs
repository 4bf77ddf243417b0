#![allow(dead_code)]

use imgslot::slots::Slot;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Slots in document order, duplicates and gaps allowed.
pub fn arb_slots(max_slot: u32, max_len: usize) -> impl Strategy<Value = Vec<Slot>> {
    prop::collection::vec(1..=max_slot, 0..=max_len)
        .prop_map(|values| values.into_iter().map(Slot::new).collect())
}

/// A permutation of `1..=n` for some `n` up to `max_len`.
pub fn arb_permutation(max_len: usize) -> impl Strategy<Value = Vec<Slot>> {
    (0..=max_len)
        .prop_flat_map(|n| Just((1..=n as u32).map(Slot::new).collect::<Vec<_>>()).prop_shuffle())
}

/// Caption text that can live inside `![...]` and on a single line.
pub fn arb_caption() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,.'-]{0,16}".prop_map(|s| s.trim().to_string())
}

/// Prose that contains neither tags nor embedded references.
pub fn arb_prose() -> impl Strategy<Value = String> {
    "[a-z \n#*]{0,12}"
}

/// Render slots as a tagged document, with prose between the tags.
pub fn tagged_document(slots: &[Slot], prose: &[String]) -> String {
    let mut out = String::new();
    for (index, slot) in slots.iter().enumerate() {
        if let Some(text) = prose.get(index) {
            out.push_str(text);
        }
        out.push_str(&format!("[IMG {}]", slot));
    }
    if let Some(tail) = prose.get(slots.len()) {
        out.push_str(tail);
    }
    out
}

/// A caption that survives the one-caption-per-line file unchanged and is
/// never replaced by the default.
pub fn arb_nonempty_caption() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9 ,.'-]{0,14}[A-Za-z0-9])?"
}

/// Numbered images with captions, plus the order they are referenced in.
///
/// Every reference points at one of the generated slots, so each slot keeps a
/// single caption.
pub fn arb_gallery() -> impl Strategy<Value = (Vec<(Slot, String)>, Vec<usize>)> {
    prop::collection::btree_map(1..=20u32, arb_nonempty_caption(), 1..6).prop_flat_map(|images| {
        let images: Vec<(Slot, String)> = images
            .into_iter()
            .map(|(slot, caption)| (Slot::new(slot), caption))
            .collect();
        let count = images.len();
        (Just(images), prop::collection::vec(0..count, 0..10))
    })
}
