//! Rename plan and renumbering report types.

use serde::Serialize;
use std::fmt;

use crate::slots::{Slot, SlotMap};

/// One manual file operation needed after renumbering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlanInstruction {
    /// The image for `old_slot` must be renamed to carry `new_slot`.
    Rename {
        new_slot: Slot,
        old_slot: Slot,
        from: String,
        to: String,
    },
    /// No image exists for `old_slot`, so `new_slot` has nothing to show.
    Missing { new_slot: Slot, old_slot: Slot },
}

impl fmt::Display for PlanInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanInstruction::Rename { from, to, .. } => write!(f, "RENAME: {from}  -->  {to}"),
            PlanInstruction::Missing { new_slot, old_slot } => write!(
                f,
                "MISSING: New [IMG {new_slot}] needs an image (was [IMG {old_slot}])"
            ),
        }
    }
}

/// The file operations that align the image directory with a renumbering.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RenamePlan {
    /// Instructions in ascending new-slot order.
    pub instructions: Vec<PlanInstruction>,
    /// Old slots whose image now backs several new slots. Their file has to
    /// be copied, since one rename cannot satisfy two destinations.
    pub copy_required: Vec<Slot>,
}

impl RenamePlan {
    /// Returns true if no file needs to change.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns true if some image must be copied rather than renamed.
    pub fn needs_copies(&self) -> bool {
        !self.copy_required.is_empty()
    }

    /// Number of rename instructions.
    pub fn rename_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, PlanInstruction::Rename { .. }))
            .count()
    }

    /// Number of new slots with no image.
    pub fn missing_count(&self) -> usize {
        self.instructions.len() - self.rename_count()
    }
}

impl fmt::Display for RenamePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File renaming plan:")?;
        if self.instructions.is_empty() {
            writeln!(f, "  Files are already numbered correctly")?;
        } else {
            for instruction in &self.instructions {
                writeln!(f, "  {instruction}")?;
            }
        }

        if self.needs_copies() {
            let slots: Vec<String> = self.copy_required.iter().map(Slot::to_string).collect();
            writeln!(f)?;
            writeln!(f, "[!] WARNING: duplicated images detected")?;
            writeln!(
                f,
                "  Old slot(s) {} appear more than once in the document.",
                slots.join(", ")
            )?;
            writeln!(
                f,
                "  COPY those files instead of renaming them so every new slot has an image."
            )?;
        }

        Ok(())
    }
}

/// Everything a renumbering run produced, for display or JSON output.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RenumberReport {
    /// Number of tags renumbered.
    pub tag_count: usize,
    /// True when every tag kept its number.
    pub unchanged: bool,
    /// New slot → old slot, as a list indexed from new slot 1.
    pub slot_map: SlotMap,
    /// Whether a renumbered caption file was produced.
    pub captions_rekeyed: bool,
    /// The rename plan; absent when no image directory was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<RenamePlan>,
}

impl RenumberReport {
    /// Builds a report for a renumbering.
    pub fn new(slot_map: &SlotMap, captions_rekeyed: bool, plan: Option<RenamePlan>) -> Self {
        Self {
            tag_count: slot_map.len(),
            unchanged: slot_map.is_identity(),
            slot_map: slot_map.clone(),
            captions_rekeyed,
            plan,
        }
    }
}

impl fmt::Display for RenumberReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Renumbered {} tag(s)", self.tag_count)?;
        if self.unchanged {
            writeln!(f, "  numbering was already contiguous")?;
        }
        if self.captions_rekeyed {
            writeln!(f, "  captions reordered to match")?;
        }

        if let Some(plan) = &self.plan {
            writeln!(f)?;
            write!(f, "{plan}")?;
        }

        Ok(())
    }
}
