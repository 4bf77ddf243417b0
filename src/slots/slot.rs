//! Slot identity and the old→new renumbering map.
//!
//! Using a newtype keeps slots from being mixed up with document positions
//! or occurrence counts, which are also plain integers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A positive integer shared by a tag, an image file and a caption line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(pub u32);

impl Slot {
    /// Creates a new Slot.
    #[inline]
    pub fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// Returns the underlying u32 value.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Parses a run of ASCII digits into a slot.
    ///
    /// Returns `None` for zero or for values that do not fit in `u32`; such
    /// text is never treated as a slot.
    pub fn parse_digits(digits: &str) -> Option<Self> {
        match digits.parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(Self(n)),
        }
    }

    /// The slot held by the 0-based `index`-th position of a 1-based sequence.
    ///
    /// Positions past the last representable slot saturate at `u32::MAX`.
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        let slot = index
            .checked_add(1)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(u32::MAX);
        Self(slot)
    }

    /// The 0-based index of this slot in a 1-based sequence.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize - 1
    }
}

impl From<u32> for Slot {
    fn from(slot: u32) -> Self {
        Self(slot)
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The renumbering correspondence produced by the normalizer.
///
/// Keyed by *new* slot: position `k - 1` holds the old slot that occupied the
/// k-th tag of the document. Several new slots may point at the same old
/// slot when the document referenced one image more than once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotMap {
    origins: Vec<Slot>,
}

impl SlotMap {
    /// Builds the map from old slots listed in document order.
    pub fn from_document_order(origins: Vec<Slot>) -> Self {
        Self { origins }
    }

    /// Number of new slots (total tag occurrences).
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns true if the document had no tags.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// The old slot that new slot `new` came from.
    pub fn old_slot(&self, new: Slot) -> Option<Slot> {
        if new.as_u32() == 0 {
            return None;
        }
        self.origins.get(new.index()).copied()
    }

    /// Iterates `(new, old)` pairs in ascending new-slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Slot)> + '_ {
        self.origins
            .iter()
            .enumerate()
            .map(|(index, old)| (Slot::from_index(index), *old))
    }

    /// Returns true if every new slot equals the old slot it came from.
    pub fn is_identity(&self) -> bool {
        self.iter().all(|(new, old)| new == old)
    }

    /// Old slots that feed more than one new slot, ascending.
    pub fn duplicate_origins(&self) -> Vec<Slot> {
        let mut uses: BTreeMap<Slot, usize> = BTreeMap::new();
        for old in &self.origins {
            *uses.entry(*old).or_default() += 1;
        }
        uses.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(slot, _)| slot)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(old: &[u32]) -> SlotMap {
        SlotMap::from_document_order(old.iter().copied().map(Slot::new).collect())
    }

    #[test]
    fn parse_digits_rejects_zero_and_overflow() {
        assert_eq!(Slot::parse_digits("12"), Some(Slot(12)));
        assert_eq!(Slot::parse_digits("007"), Some(Slot(7)));
        assert_eq!(Slot::parse_digits("0"), None);
        assert_eq!(Slot::parse_digits("99999999999"), None);
    }

    #[test]
    fn from_index_is_one_based_and_saturates() {
        assert_eq!(Slot::from_index(0), Slot(1));
        assert_eq!(Slot::from_index(41), Slot(42));
        assert_eq!(Slot::from_index(u32::MAX as usize - 1), Slot(u32::MAX));
        assert_eq!(Slot::from_index(usize::MAX), Slot(u32::MAX));
    }

    #[test]
    fn slot_ordering_and_hash() {
        use std::collections::HashSet;
        assert!(Slot(1) < Slot(2));
        let set: HashSet<Slot> = [Slot(1), Slot(2), Slot(1)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn slot_map_is_keyed_by_new_slot() {
        let m = map(&[5, 3, 5]);
        assert_eq!(m.old_slot(Slot(1)), Some(Slot(5)));
        assert_eq!(m.old_slot(Slot(2)), Some(Slot(3)));
        assert_eq!(m.old_slot(Slot(3)), Some(Slot(5)));
        assert_eq!(m.old_slot(Slot(4)), None);
        assert_eq!(m.old_slot(Slot(0)), None);
    }

    #[test]
    fn slot_map_identity_and_duplicates() {
        assert!(map(&[1, 2, 3]).is_identity());
        assert!(!map(&[2, 1]).is_identity());
        assert!(map(&[]).is_identity());
        assert_eq!(map(&[1, 2, 2, 3]).duplicate_origins(), vec![Slot(2)]);
        assert!(map(&[3, 1, 2]).duplicate_origins().is_empty());
    }
}
