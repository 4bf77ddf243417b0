//! Shared slot model for imgslot.
//!
//! A *slot* is the positive integer that ties together three artifacts:
//! a `[IMG n]` tag in the document, an image file named `n-whatever.png`,
//! and line `n` of the caption side-file. Every component (extraction,
//! materialization, validation, renumbering) works on the types defined here
//! and never on each other.
//!
//! # Design Principles
//!
//! 1. **Permissive Parsing**: malformed references and odd filenames are kept
//!    as opaque text rather than rejected, so a document always round-trips.
//!
//! 2. **Explicit Order**: the image directory is enumerated in filename
//!    order, so prefix collisions resolve the same way on every machine.
//!
//! # Example
//!
//! ```
//! use imgslot::slots::{Slot, TaggedDocument};
//!
//! let doc = TaggedDocument::parse("intro [IMG 2] middle [IMG   1] end");
//! assert_eq!(doc.slots(), vec![Slot::new(2), Slot::new(1)]);
//! ```

mod captions;
mod directory;
mod document;
pub mod io;
mod slot;

// Re-export core types for convenient access
pub use captions::CaptionStore;
pub use directory::{
    is_image_file, slot_from_file_name, strip_slot_prefix, DirectoryEntry, FileDirectory,
    IMAGE_EXTENSIONS,
};
pub use document::{Segment, Tag, TaggedDocument};
pub use slot::{Slot, SlotMap};
