//! Consistency validation for imgslot.
//!
//! This module checks a tagged document against the image directory for:
//! - Duplicate slots (one number tagged in several places)
//! - Gaps in the slot sequence between the lowest and highest tag
//! - Tags with no numbered image file
//! - Image files hidden by another file with the same numeric prefix
//!
//! Every check runs, and all findings come back together in one report.
//! Validation never changes the document, the captions or the files.

mod report;

pub use report::{
    DuplicateSlot, IssueCode, IssueContext, Severity, SlotRange, ValidationIssue,
    ValidationReport,
};

use std::collections::{BTreeMap, BTreeSet};

use crate::slots::{FileDirectory, Slot, TaggedDocument};

/// Validates the tags of a document against an image directory.
pub fn validate_document(document: &TaggedDocument, directory: &FileDirectory) -> ValidationReport {
    validate_slots(&document.slots(), directory)
}

/// Validates slots listed in document order against an image directory.
///
/// An empty slot list skips the duplicate and gap checks and is reported as
/// "no tags found"; shadowed image files are still reported.
pub fn validate_slots(slots: &[Slot], directory: &FileDirectory) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.tag_count = slots.len();

    let mut occurrences: BTreeMap<Slot, usize> = BTreeMap::new();
    for slot in slots {
        *occurrences.entry(*slot).or_default() += 1;
    }

    if slots.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::NoTags,
            "No [IMG n] tags found",
            IssueContext::Document,
        ));
    } else {
        check_duplicates(&occurrences, &mut report);
        check_gaps(&occurrences, &mut report);
    }

    check_missing_files(&occurrences, directory, &mut report);
    check_shadowed_files(directory, &mut report);

    report
}

/// Reports every slot that is tagged more than once.
fn check_duplicates(occurrences: &BTreeMap<Slot, usize>, report: &mut ValidationReport) {
    for (slot, count) in occurrences {
        if *count < 2 {
            continue;
        }

        report.duplicates.push(DuplicateSlot {
            slot: *slot,
            occurrences: *count,
        });
        report.add(ValidationIssue::error(
            IssueCode::DuplicateSlot,
            format!("Slot {} is tagged {} times", slot, count),
            IssueContext::Slot { slot: *slot },
        ));
    }
}

/// Reports the untagged runs between the lowest and highest slot.
fn check_gaps(occurrences: &BTreeMap<Slot, usize>, report: &mut ValidationReport) {
    let (Some(min), Some(max)) = (occurrences.keys().next(), occurrences.keys().next_back())
    else {
        return;
    };
    report.range = Some(SlotRange {
        min: *min,
        max: *max,
    });

    // Walk neighbouring tagged slots; the space between two of them is one run.
    let keys: Vec<Slot> = occurrences.keys().copied().collect();
    for pair in keys.windows(2) {
        let (low, high) = (pair[0].as_u32(), pair[1].as_u32());
        if high - low < 2 {
            continue;
        }

        let run = SlotRange {
            min: Slot::new(low + 1),
            max: Slot::new(high - 1),
        };
        let message = if run.min == run.max {
            format!("No tag uses slot {} (sequence runs {}..{})", run.min, min, max)
        } else {
            format!(
                "No tag uses slots {}..{} (sequence runs {}..{})",
                run.min, run.max, min, max
            )
        };
        report.add(ValidationIssue::warning(
            IssueCode::SlotGap,
            message,
            IssueContext::Slots {
                min: run.min,
                max: run.max,
            },
        ));
        report.gaps.push(run);
    }
}

/// Reports every tagged slot that has no image file.
fn check_missing_files(
    occurrences: &BTreeMap<Slot, usize>,
    directory: &FileDirectory,
    report: &mut ValidationReport,
) {
    for slot in occurrences.keys() {
        if directory.contains(*slot) {
            continue;
        }

        report.missing_files.push(*slot);
        report.add(ValidationIssue::error(
            IssueCode::MissingImageFile,
            format!("[IMG {}] has no matching image file", slot),
            IssueContext::Slot { slot: *slot },
        ));
    }
}

/// Reports image files whose prefix was taken by a later file.
fn check_shadowed_files(directory: &FileDirectory, report: &mut ValidationReport) {
    let shadowed_slots: BTreeSet<Slot> = directory.shadowed().iter().map(|e| e.slot).collect();

    for entry in directory.shadowed() {
        let winner = directory.get(entry.slot).unwrap_or_default();
        report.add(ValidationIssue::warning(
            IssueCode::ShadowedImageFile,
            format!(
                "Slot {} is claimed by several files; '{}' is ignored in favour of '{}'",
                entry.slot, entry.file_name, winner
            ),
            IssueContext::File {
                name: entry.file_name.clone(),
            },
        ));
    }

    report.shadowed_files = directory.shadowed().to_vec();
    report.shadowed_slots = shadowed_slots.into_iter().collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(values: &[u32]) -> Vec<Slot> {
        values.iter().copied().map(Slot::new).collect()
    }

    fn full_directory(max: u32) -> FileDirectory {
        FileDirectory::from_file_names((1..=max).map(|n| format!("{}-img.png", n)))
    }

    #[test]
    fn test_clean_sequence() {
        let report = validate_slots(&slots(&[1, 2, 3]), &full_directory(3));
        assert!(
            report.issues.is_empty(),
            "Expected no issues, got: {:?}",
            report.issues
        );
        assert!(!report.has_findings());
        assert_eq!(report.tag_count, 3);
        assert_eq!(
            report.range,
            Some(SlotRange {
                min: Slot(1),
                max: Slot(3)
            })
        );
    }

    #[test]
    fn test_duplicate_slots() {
        let report = validate_slots(&slots(&[1, 2, 2, 3]), &full_directory(3));
        assert_eq!(report.duplicate_slots(), vec![Slot(2)]);
        assert_eq!(report.duplicates[0].occurrences, 2);
        assert_eq!(report.error_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::DuplicateSlot));
    }

    #[test]
    fn test_gap_detection() {
        let report = validate_slots(&slots(&[1, 2, 4, 5]), &full_directory(5));
        assert_eq!(report.gap_slots().collect::<Vec<_>>(), vec![Slot(3)]);
        assert_eq!(
            report.range,
            Some(SlotRange {
                min: Slot(1),
                max: Slot(5)
            })
        );
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_range_starts_at_lowest_slot() {
        let report = validate_slots(&slots(&[7, 5]), &full_directory(7));
        assert_eq!(report.gap_slots().collect::<Vec<_>>(), vec![Slot(6)]);
    }

    #[test]
    fn test_gap_runs_give_one_issue_each() {
        let report = validate_slots(&slots(&[1, 5, 6, 9]), &full_directory(9));
        assert_eq!(
            report.gaps,
            vec![
                SlotRange {
                    min: Slot(2),
                    max: Slot(4)
                },
                SlotRange {
                    min: Slot(7),
                    max: Slot(8)
                },
            ]
        );
        let gap_issues = report
            .issues
            .iter()
            .filter(|i| i.code == IssueCode::SlotGap)
            .count();
        assert_eq!(gap_issues, 2);
    }

    #[test]
    fn test_widest_gap_stays_one_run() {
        let dir = FileDirectory::from_file_names(["1-a.png", "4294967295-z.png"]);
        let report = validate_slots(&slots(&[1, u32::MAX]), &dir);
        assert_eq!(
            report.gaps,
            vec![SlotRange {
                min: Slot(2),
                max: Slot(u32::MAX - 1)
            }]
        );
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.gap_slots().nth(2), Some(Slot(4)));
    }

    #[test]
    fn test_missing_files() {
        let dir = FileDirectory::from_file_names(["1-a.png", "2-b.png"]);
        let report = validate_slots(&slots(&[1, 2, 3]), &dir);
        assert_eq!(report.missing_files, vec![Slot(3)]);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::MissingImageFile));
    }

    #[test]
    fn test_missing_files_are_deduplicated() {
        let report = validate_slots(&slots(&[4, 4]), &FileDirectory::new());
        assert_eq!(report.missing_files, vec![Slot(4)]);
    }

    #[test]
    fn test_all_checks_run_together() {
        let dir = FileDirectory::from_file_names(["1-a.png", "2-b.png"]);
        let report = validate_slots(&slots(&[1, 1, 4]), &dir);
        assert_eq!(report.duplicate_slots(), vec![Slot(1)]);
        assert_eq!(
            report.gaps,
            vec![SlotRange {
                min: Slot(2),
                max: Slot(3)
            }]
        );
        assert_eq!(report.gap_slots().collect::<Vec<_>>(), vec![Slot(2), Slot(3)]);
        assert_eq!(report.missing_files, vec![Slot(4)]);
    }

    #[test]
    fn test_empty_input_reports_no_tags() {
        let report = validate_slots(&[], &full_directory(2));
        assert!(!report.has_tags());
        assert!(report.range.is_none());
        assert!(report.gaps.is_empty());
        assert!(report.duplicates.is_empty());
        assert!(report.issues.iter().any(|i| i.code == IssueCode::NoTags));
        assert_eq!(report.error_count(), 0);
        assert!(!report.has_findings());
    }

    #[test]
    fn test_shadowed_files_are_reported() {
        let dir = FileDirectory::from_file_names(["1-a.png", "1-b.png"]);
        let report = validate_slots(&slots(&[1]), &dir);
        assert_eq!(report.shadowed_slots, vec![Slot(1)]);
        assert_eq!(report.shadowed_files[0].file_name, "1-a.png");
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::ShadowedImageFile));
    }

    #[test]
    fn test_validate_document_uses_document_order() {
        let doc = TaggedDocument::parse("[IMG 2] text [IMG 1]");
        let report = validate_document(&doc, &full_directory(2));
        assert!(report.issues.is_empty());
        assert_eq!(report.tag_count, 2);
    }
}
