//! Extraction report types and text formatting.

use serde::Serialize;
use std::fmt;

use crate::slots::Slot;

/// Summary of one extraction run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExtractReport {
    /// References converted into tags.
    pub resolved: usize,
    /// Distinct slots that received a caption.
    pub caption_slots: usize,
    /// References left untouched because their filename had no number.
    pub passed_through: Vec<String>,
    /// Slots referenced more than once with different captions.
    pub caption_conflicts: Vec<Slot>,
}

impl fmt::Display for ExtractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} reference(s) into tags ({} distinct slot(s))",
            self.resolved, self.caption_slots
        )?;

        if !self.passed_through.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Left unchanged, no numeric prefix ({}):",
                self.passed_through.len()
            )?;
            for source in &self.passed_through {
                writeln!(f, "  - {source}")?;
            }
        }

        if !self.caption_conflicts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Slots with conflicting captions (last one kept):")?;
            for slot in &self.caption_conflicts {
                writeln!(f, "  - [IMG {slot}]")?;
            }
        }

        Ok(())
    }
}
