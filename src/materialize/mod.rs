//! `[IMG n]` tags → embedded references.
//!
//! The inverse of extraction: each tag whose slot has an image file becomes
//! `![caption](prefix/file)`. Tags without a file stay as they are and are
//! listed in the report, so nothing is ever silently dropped.

mod report;

pub use report::MaterializeReport;

use std::collections::BTreeSet;

use tracing::warn;

use crate::slots::{CaptionStore, FileDirectory, Segment, Slot, TaggedDocument};

/// Caption used when the caption store has nothing for a slot.
pub const DEFAULT_CAPTION: &str = "Alt text";

/// Directory prefix written in front of image filenames by default.
pub const DEFAULT_IMAGE_PREFIX: &str = "images";

/// Options for materialization.
#[derive(Clone, Debug)]
pub struct MaterializeOptions {
    /// Path prefix placed before each filename (`images` → `images/3-a.png`).
    /// Empty means the bare filename.
    pub image_prefix: String,
    /// Caption for slots without one in the caption store.
    pub default_caption: String,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            default_caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

/// The result of materializing a tagged document.
#[derive(Clone, Debug, Default)]
pub struct Materialized {
    /// Document text with resolvable tags expanded.
    pub document: String,
    /// Which tags resolved and which did not.
    pub report: MaterializeReport,
}

/// Expand tags into embedded references.
pub fn materialize(
    document: &TaggedDocument,
    directory: &FileDirectory,
    captions: &CaptionStore,
    opts: &MaterializeOptions,
) -> Materialized {
    let mut out = String::new();
    let mut report = MaterializeReport::default();
    let mut defaulted: BTreeSet<Slot> = BTreeSet::new();

    for segment in document.segments() {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Tag(tag) => {
                let slot = tag.slot();
                let Some(file_name) = directory.get(slot) else {
                    warn!("[IMG {}] has no matching image file", slot);
                    report.unresolved.push(slot);
                    out.push_str(tag.source());
                    continue;
                };

                let caption = match captions.non_empty(slot) {
                    Some(caption) => caption,
                    None => {
                        defaulted.insert(slot);
                        opts.default_caption.as_str()
                    }
                };

                report.resolved += 1;
                out.push_str(&format!(
                    "![{}]({})",
                    caption,
                    image_path(&opts.image_prefix, file_name)
                ));
            }
        }
    }

    report.default_captions = defaulted.into_iter().collect();

    Materialized {
        document: out,
        report,
    }
}

fn image_path(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches(|c: char| c == '/' || c == '\\');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}
