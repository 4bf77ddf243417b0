//! Numbered image files and the slot → filename directory.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::Slot;

/// Extensions (case-insensitive) the directory scanner treats as images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

static RE_FILE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[-_].").unwrap());
static RE_STRIP_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[-_]").unwrap());

/// The slot encoded in a filename such as `12-diagram.png`.
///
/// The prefix must be followed by `-` or `_` and at least one more
/// character.
pub fn slot_from_file_name(file_name: &str) -> Option<Slot> {
    let caps = RE_FILE_PREFIX.captures(file_name)?;
    Slot::parse_digits(&caps[1])
}

/// Removes the numeric prefix and its separator: `12-diagram.png` → `diagram.png`.
///
/// Names without a prefix are returned unchanged.
pub fn strip_slot_prefix(file_name: &str) -> &str {
    match RE_STRIP_PREFIX.find(file_name) {
        Some(prefix) => &file_name[prefix.end()..],
        None => file_name,
    }
}

/// Returns true if `path` has one of the [`IMAGE_EXTENSIONS`].
pub fn is_image_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}

/// One numbered file in the image directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub slot: Slot,
    pub file_name: String,
}

/// Mapping from slot to image filename.
///
/// Names are applied in the order given; when two names share a slot the
/// later one wins and the earlier one is kept in [`FileDirectory::shadowed`]
/// so the collision can be reported. The scanner feeds names sorted by
/// filename, which makes the winner deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileDirectory {
    files: BTreeMap<Slot, String>,
    shadowed: Vec<DirectoryEntry>,
}

impl FileDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from bare filenames, skipping names without a
    /// numeric prefix.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut directory = Self::new();
        for name in names {
            directory.insert(name.into());
        }
        directory
    }

    /// Adds a filename. Returns the slot it was filed under, or `None` when
    /// the name carries no numeric prefix.
    pub fn insert(&mut self, file_name: String) -> Option<Slot> {
        let slot = slot_from_file_name(&file_name)?;
        if let Some(previous) = self.files.insert(slot, file_name) {
            self.shadowed.push(DirectoryEntry {
                slot,
                file_name: previous,
            });
        }
        Some(slot)
    }

    /// The file for `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.files.get(&slot).map(String::as_str)
    }

    /// Returns true if some file carries `slot`.
    pub fn contains(&self, slot: Slot) -> bool {
        self.files.contains_key(&slot)
    }

    /// Files that lost a prefix collision, in the order they were displaced.
    pub fn shadowed(&self) -> &[DirectoryEntry] {
        &self.shadowed
    }

    /// Number of distinct slots with a file.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no numbered files were found.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates `(slot, filename)` in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> + '_ {
        self.files.iter().map(|(slot, name)| (*slot, name.as_str()))
    }
}
