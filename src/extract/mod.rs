//! Embedded references → `[IMG n]` tags.
//!
//! Every `![caption](path)` whose filename starts with a number becomes a bare
//! tag, and its caption is filed under that number in a [`CaptionStore`].
//! References without a number are left exactly as written.

mod report;

pub use report::ExtractReport;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::slots::{CaptionStore, Segment, Slot, Tag, TaggedDocument};

// A reference never spans lines, so a caption always fits one side-file line.
static RE_EMBEDDED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());
static RE_NAME_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[-_.]").unwrap());

/// What happened to one embedded reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefOutcome {
    /// The filename carried a slot; the reference becomes a tag.
    Resolved { slot: Slot, caption: String },
    /// No usable prefix; the original text stays in the document.
    PassedThrough(String),
}

/// The result of extracting tags from a document.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// The document with resolved references replaced by tags.
    pub document: TaggedDocument,
    /// Captions harvested from resolved references, covering `1..=max`.
    pub captions: CaptionStore,
    /// Summary of what was converted and what was left alone.
    pub report: ExtractReport,
}

/// Decide whether an embedded reference can become a tag.
///
/// The slot comes from the leading digits of the path's last component,
/// which must be followed by `-`, `_` or `.` (`12-chart.png`, `7.jpg`).
pub fn classify_reference(source: &str, caption: &str, path: &str) -> RefOutcome {
    let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);

    let slot = RE_NAME_PREFIX
        .captures(file_name)
        .and_then(|caps| Slot::parse_digits(&caps[1]));

    match slot {
        Some(slot) => RefOutcome::Resolved {
            slot,
            caption: caption.to_string(),
        },
        None => RefOutcome::PassedThrough(source.to_string()),
    }
}

/// Convert every numbered embedded reference in `text` into a tag.
///
/// When several references resolve to the same slot, the last caption wins
/// and the slot is listed in [`ExtractReport::caption_conflicts`] if the
/// captions differed.
pub fn extract_tags(text: &str) -> Extraction {
    let mut segments = Vec::new();
    let mut harvested: BTreeMap<Slot, String> = BTreeMap::new();
    let mut report = ExtractReport::default();
    let mut last = 0;

    for caps in RE_EMBEDDED.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always matches");
        push_span(&mut segments, &text[last..whole.start()]);
        last = whole.end();

        match classify_reference(whole.as_str(), &caps[1], &caps[2]) {
            RefOutcome::Resolved { slot, caption } => {
                report.resolved += 1;
                if let Some(previous) = harvested.insert(slot, caption.clone()) {
                    if previous != caption && !report.caption_conflicts.contains(&slot) {
                        report.caption_conflicts.push(slot);
                    }
                }
                segments.push(Segment::Tag(Tag::new(slot)));
            }
            RefOutcome::PassedThrough(source) => {
                debug!("No numeric prefix, leaving reference as is: {}", source);
                push_span(&mut segments, &source);
                report.passed_through.push(source);
            }
        }
    }
    push_span(&mut segments, &text[last..]);

    report.caption_conflicts.sort();
    report.caption_slots = harvested.len();

    Extraction {
        document: TaggedDocument::from_segments(segments),
        captions: CaptionStore::from_entries(harvested),
        report,
    }
}

/// Text between references may already hold tags; keep them as tags.
fn push_span(segments: &mut Vec<Segment>, span: &str) {
    segments.extend(TaggedDocument::parse(span).segments().iter().cloned());
}

/// Fuzz-only entrypoint: the extracted document must agree with a fresh
/// parse of its own rendering.
#[cfg(feature = "fuzzing")]
pub fn fuzz_extract(input: &str) {
    let extraction = extract_tags(input);
    let reparsed = TaggedDocument::parse(&extraction.document.to_string());
    assert_eq!(reparsed.slots(), extraction.document.slots());
    assert!(extraction.document.tag_count() >= extraction.report.resolved);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_numbered_references_with_tags() {
        let out = extract_tags("Intro\n![A cat](images/2-cat.png)\n![A dog](images/5_dog.jpg)\n");
        assert_eq!(out.document.to_string(), "Intro\n[IMG 2]\n[IMG 5]\n");
        assert_eq!(out.report.resolved, 2);
        assert!(out.report.passed_through.is_empty());
    }

    #[test]
    fn caption_store_covers_one_to_max() {
        let out = extract_tags("![two](2-a.png) ![four](x/4-b.png)");
        assert_eq!(out.captions.len(), 4);
        assert_eq!(out.captions.to_string(), "\ntwo\n\nfour\n");
        assert_eq!(out.report.caption_slots, 2);
    }

    #[test]
    fn unnumbered_references_pass_through() {
        let text = "![logo](assets/logo.png) and ![](https://x.org/pic.png)";
        let out = extract_tags(text);
        assert_eq!(out.document.to_string(), text);
        assert!(out.captions.is_empty());
        assert_eq!(out.report.passed_through.len(), 2);
        assert_eq!(out.report.resolved, 0);
    }

    #[test]
    fn dot_separator_is_accepted() {
        let out = extract_tags("![x](7.png)");
        assert_eq!(out.document.to_string(), "[IMG 7]");
    }

    #[test]
    fn zero_prefix_passes_through() {
        let out = extract_tags("![x](0-cover.png)");
        assert_eq!(out.document.to_string(), "![x](0-cover.png)");
    }

    #[test]
    fn only_the_filename_component_is_inspected() {
        let out = extract_tags("![x](2024/photo.png) ![y](dir\\3-win.png)");
        assert_eq!(out.document.to_string(), "![x](2024/photo.png) [IMG 3]");
    }

    #[test]
    fn repeated_slot_keeps_last_caption_and_reports_conflict() {
        let out = extract_tags("![old](1-a.png) ![new](1-a.png) ![same](2-b.png) ![same](2-b.png)");
        assert_eq!(out.captions.get(Slot(1)), "new");
        assert_eq!(out.report.caption_conflicts, vec![Slot(1)]);
        assert_eq!(out.document.slots(), vec![Slot(1), Slot(1), Slot(2), Slot(2)]);
    }

    #[test]
    fn reference_split_across_lines_passes_through() {
        let text = "![A long\ncaption](images/1-a.png)\n![dog](images/2-b.png)\n";
        let out = extract_tags(text);
        assert_eq!(
            out.document.to_string(),
            "![A long\ncaption](images/1-a.png)\n[IMG 2]\n"
        );
        assert_eq!(out.report.resolved, 1);

        let reread = CaptionStore::from_lines(&out.captions.to_string());
        assert_eq!(reread.get(Slot::new(1)), "");
        assert_eq!(reread.get(Slot::new(2)), "dog");
    }

    #[test]
    fn existing_tags_stay_tags() {
        let out = extract_tags("[IMG 3] then ![a](4-a.png)");
        assert_eq!(out.document.slots(), vec![Slot::new(3), Slot::new(4)]);
        assert_eq!(out.report.resolved, 1);
    }

    #[test]
    fn extraction_is_a_no_op_on_its_own_output() {
        let first = extract_tags("![a](1-a.png) text ![b](2-b.png)");
        let second = extract_tags(&first.document.to_string());
        assert_eq!(second.document.to_string(), first.document.to_string());
        assert_eq!(second.report.resolved, 0);
        assert!(second.captions.is_empty());
    }

    #[test]
    fn classify_reference_outcomes() {
        assert_eq!(
            classify_reference("![c](9-x.png)", "c", "9-x.png"),
            RefOutcome::Resolved {
                slot: Slot(9),
                caption: "c".to_string()
            }
        );
        assert_eq!(
            classify_reference("![c](x.png)", "c", "x.png"),
            RefOutcome::PassedThrough("![c](x.png)".to_string())
        );
    }
}
