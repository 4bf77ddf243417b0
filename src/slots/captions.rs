//! The slot-indexed caption store and its one-caption-per-line format.

use serde::Serialize;
use std::fmt;

use super::Slot;

/// Alt-text captions keyed by slot.
///
/// Entry `i` holds the caption for slot `i + 1`; there are no holes, a slot
/// without a caption holds the empty string. Asking for a slot past the end
/// also yields the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CaptionStore {
    captions: Vec<String>,
}

impl CaptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the side-file format: line `n` is the caption for slot `n`.
    ///
    /// Surrounding whitespace is trimmed, so a whitespace-only line is an
    /// empty caption.
    pub fn from_lines(text: &str) -> Self {
        Self {
            captions: text.lines().map(|line| line.trim().to_string()).collect(),
        }
    }

    /// Builds a store covering `1..=max(slot)`, filling unseen slots with
    /// empty captions. A later entry for the same slot replaces an earlier one.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Slot, S)>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for (slot, caption) in entries {
            store.set(slot, caption);
        }
        store
    }

    /// Sets the caption for `slot`, growing the store with empty captions as
    /// needed. Slot zero is ignored.
    pub fn set(&mut self, slot: Slot, caption: impl Into<String>) {
        if slot.as_u32() == 0 {
            return;
        }
        let index = slot.index();
        if self.captions.len() <= index {
            self.captions.resize(index + 1, String::new());
        }
        self.captions[index] = caption.into();
    }

    /// The caption for `slot`, empty when the store has none.
    pub fn get(&self, slot: Slot) -> &str {
        if slot.as_u32() == 0 {
            return "";
        }
        self.captions
            .get(slot.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The caption for `slot` if it is present and non-empty.
    pub fn non_empty(&self, slot: Slot) -> Option<&str> {
        Some(self.get(slot)).filter(|caption| !caption.is_empty())
    }

    /// The highest slot this store describes.
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Returns true if the store describes no slots.
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Returns true if no slot has a non-empty caption.
    pub fn is_blank(&self) -> bool {
        self.captions.iter().all(String::is_empty)
    }

    /// Iterates `(slot, caption)` for every slot the store describes.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> + '_ {
        self.captions
            .iter()
            .enumerate()
            .map(|(index, caption)| (Slot::from_index(index), caption.as_str()))
    }
}

/// Renders the side-file format, one caption per line with a trailing newline.
impl fmt::Display for CaptionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for caption in &self.captions {
            writeln!(f, "{}", caption)?;
        }
        Ok(())
    }
}
