//! Validation report types for structured error reporting.
//!
//! This module provides rich, structured validation results that can be
//! displayed to users, written as JSON, or processed programmatically.

use serde::Serialize;
use std::fmt;

use crate::slots::{DirectoryEntry, Slot};

/// The result of validating a tagged document against an image directory.
///
/// The typed finding lists carry the raw data; `issues` carries the same
/// findings as human-readable messages with a severity and a stable code.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Number of tag occurrences in the document.
    pub tag_count: usize,

    /// Lowest and highest slot used; `None` when there are no tags.
    pub range: Option<SlotRange>,

    /// Slots tagged more than once, ascending.
    pub duplicates: Vec<DuplicateSlot>,

    /// Runs of slots inside `range` that no tag uses, ascending.
    pub gaps: Vec<SlotRange>,

    /// Tagged slots without an image file, ascending.
    pub missing_files: Vec<Slot>,

    /// Image files ignored because a later file reused their prefix.
    pub shadowed_files: Vec<DirectoryEntry>,

    /// Slots claimed by more than one image file, ascending.
    pub shadowed_slots: Vec<Slot>,

    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns true if the document contained at least one tag.
    pub fn has_tags(&self) -> bool {
        self.tag_count > 0
    }

    /// The duplicated slot values, without their counts.
    pub fn duplicate_slots(&self) -> Vec<Slot> {
        self.duplicates.iter().map(|d| d.slot).collect()
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Every untagged slot inside `range`, ascending.
    pub fn gap_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.gaps
            .iter()
            .flat_map(|run| (run.min.as_u32()..=run.max.as_u32()).map(Slot::new))
    }

    /// Returns true if anything besides an empty document was reported.
    pub fn has_findings(&self) -> bool {
        self.issues.iter().any(|i| i.code != IssueCode::NoTags)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some(range) => writeln!(
                f,
                "Found {} tag(s). Range: {} to {}",
                self.tag_count, range.min, range.max
            )?,
            None => writeln!(f, "No [IMG n] tags found")?,
        }

        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// Closed range of slots seen in a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SlotRange {
    pub min: Slot,
    pub max: Slot,
}

/// A slot that appears more than once, with its occurrence count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DuplicateSlot {
    pub slot: Slot,
    pub occurrences: usize,
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Context about where the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Something worth tidying up; every artifact can still be resolved.
    Warning,
    /// A tag that cannot be resolved to exactly one image.
    Error,
}

/// A stable code identifying the type of validation issue.
///
/// These codes can be used for filtering or programmatic handling of
/// validation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// The document contains no tags.
    NoTags,
    /// The same slot is tagged more than once.
    DuplicateSlot,
    /// A slot between the lowest and highest tag is unused.
    SlotGap,
    /// A tagged slot has no image file.
    MissingImageFile,
    /// Several image files share a numeric prefix.
    ShadowedImageFile,
}

/// Context about where a validation issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// Issue with the document as a whole.
    Document,
    /// Issue with a specific slot.
    Slot { slot: Slot },
    /// Issue with a run of slots.
    Slots { min: Slot, max: Slot },
    /// Issue with a specific image file.
    File { name: String },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Document => write!(f, "document"),
            IssueContext::Slot { slot } => write!(f, "slot {}", slot),
            IssueContext::Slots { min, max } => write!(f, "slots {}..{}", min, max),
            IssueContext::File { name } => write!(f, "file {}", name),
        }
    }
}
