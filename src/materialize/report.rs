//! Materialization report types and text formatting.

use serde::Serialize;
use std::fmt;

use crate::slots::Slot;

/// Summary of one materialization run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MaterializeReport {
    /// Tags expanded into embedded references.
    pub resolved: usize,
    /// Tags left as-is because no image file carries their slot, in
    /// document order.
    pub unresolved: Vec<Slot>,
    /// Slots that were given the default caption.
    pub default_captions: Vec<Slot>,
}

impl MaterializeReport {
    /// Returns true if every tag was expanded.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

impl fmt::Display for MaterializeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expanded {} tag(s) into images", self.resolved)?;

        if !self.unresolved.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Tags without a matching image file ({}):",
                self.unresolved.len()
            )?;
            for slot in &self.unresolved {
                writeln!(f, "  - [IMG {slot}]")?;
            }
        }

        if !self.default_captions.is_empty() {
            writeln!(f)?;
            writeln!(f, "Slots using the default caption:")?;
            for slot in &self.default_captions {
                writeln!(f, "  - [IMG {slot}]")?;
            }
        }

        Ok(())
    }
}
