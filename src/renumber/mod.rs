//! Contiguous renumbering of a tagged document.
//!
//! The k-th tag in reading order becomes `[IMG k]`, whatever number it had
//! before. From the resulting old→new [`SlotMap`] this module re-keys the
//! caption store and works out which image files have to be renamed (or
//! copied, when one old image now backs several slots).
//!
//! Nothing here touches the file system: the rename plan is a list of
//! instructions for the author.

mod report;

pub use report::{PlanInstruction, RenamePlan, RenumberReport};

use tracing::debug;

use crate::slots::{
    strip_slot_prefix, CaptionStore, FileDirectory, Segment, Slot, SlotMap, Tag, TaggedDocument,
};

/// The renumbered artifacts.
#[derive(Clone, Debug, Default)]
pub struct Renumbering {
    /// The document with every tag rewritten as `[IMG k]`.
    pub document: TaggedDocument,
    /// New slot → old slot.
    pub slot_map: SlotMap,
    /// Captions re-keyed to the new numbering, one per new slot.
    pub captions: CaptionStore,
}

/// Renumber every tag in document order and carry the captions along.
///
/// A single pass over the segments threads the map built so far; each
/// occurrence of a repeated old slot gets its own new slot.
pub fn renumber_document(document: &TaggedDocument, captions: &CaptionStore) -> Renumbering {
    let (segments, origins) = document.segments().iter().fold(
        (Vec::<Segment>::new(), Vec::<Slot>::new()),
        |(mut segments, mut origins), segment| {
            match segment {
                Segment::Text(text) => segments.push(Segment::Text(text.clone())),
                Segment::Tag(tag) => {
                    let new_slot = Slot::from_index(origins.len());
                    origins.push(tag.slot());
                    segments.push(Segment::Tag(Tag::new(new_slot)));
                }
            }
            (segments, origins)
        },
    );

    let slot_map = SlotMap::from_document_order(origins);
    debug!("Renumbered {} tag(s)", slot_map.len());

    Renumbering {
        document: TaggedDocument::from_segments(segments),
        captions: rekey_captions(&slot_map, captions),
        slot_map,
    }
}

/// Captions for the new numbering: new slot k gets the caption of the old
/// slot it came from, or an empty caption.
pub fn rekey_captions(slot_map: &SlotMap, captions: &CaptionStore) -> CaptionStore {
    CaptionStore::from_entries(
        slot_map
            .iter()
            .map(|(new, old)| (new, captions.get(old).to_string())),
    )
}

/// Work out the file operations that align the image directory with a
/// renumbering.
///
/// Instructions come out in ascending new-slot order. A new slot whose old
/// file already carries the right number needs nothing.
pub fn plan_renames(slot_map: &SlotMap, directory: &FileDirectory) -> RenamePlan {
    let mut plan = RenamePlan::default();

    for (new_slot, old_slot) in slot_map.iter() {
        match directory.get(old_slot) {
            Some(_) if new_slot == old_slot => {}
            Some(file_name) => plan.instructions.push(PlanInstruction::Rename {
                new_slot,
                old_slot,
                from: file_name.to_string(),
                to: renamed_file(file_name, new_slot),
            }),
            None => plan
                .instructions
                .push(PlanInstruction::Missing { new_slot, old_slot }),
        }
    }

    plan.copy_required = slot_map.duplicate_origins();
    plan
}

/// `5-chart.png` renumbered to 2 becomes `2-chart.png`.
pub fn renamed_file(file_name: &str, new_slot: Slot) -> String {
    format!("{}-{}", new_slot, strip_slot_prefix(file_name))
}

/// Fuzz-only entrypoint: renumbering is contiguous and a second pass is a no-op.
#[cfg(feature = "fuzzing")]
pub fn fuzz_renumber(input: &str) {
    let document = TaggedDocument::parse(input);
    let first = renumber_document(&document, &CaptionStore::new());
    assert_eq!(first.slot_map.len(), document.tag_count());
    let second = renumber_document(&first.document, &CaptionStore::new());
    assert!(second.slot_map.is_identity());
}
