//! Flat-file I/O for documents, caption side-files and the image directory.
//!
//! These are thin wrappers: everything interesting happens on the in-memory
//! types, and nothing here ever renames, copies or deletes an image.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use super::{is_image_file, CaptionStore, FileDirectory};
use crate::error::ImgslotError;

/// Read a whole document as UTF-8 text.
pub fn read_document(path: &Path) -> Result<String, ImgslotError> {
    read_text(path, "Document")
}

/// Read a caption side-file.
///
/// Returns `Ok(None)` when the file does not exist; callers decide whether
/// that matters.
pub fn read_captions(path: &Path) -> Result<Option<CaptionStore>, ImgslotError> {
    match read_text(path, "Caption file") {
        Ok(text) => {
            let store = CaptionStore::from_lines(&text);
            debug!("Read {} caption line(s) from {}", store.len(), path.display());
            Ok(Some(store))
        }
        Err(ImgslotError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Write text to `path`, replacing any existing file.
pub fn write_text(path: &Path, contents: &str) -> Result<(), ImgslotError> {
    fs::write(path, contents).map_err(|source| ImgslotError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} byte(s) to {}", contents.len(), path.display());
    Ok(())
}

/// Write a caption store in the one-caption-per-line format.
pub fn write_captions(path: &Path, captions: &CaptionStore) -> Result<(), ImgslotError> {
    write_text(path, &captions.to_string())
}

/// Scan the top level of an image directory into a [`FileDirectory`].
///
/// Only files with an image extension and a numeric prefix are kept. Entries
/// are visited in filename order, so when two files share a prefix the one
/// that sorts last wins.
pub fn scan_image_dir(dir: &Path) -> Result<FileDirectory, ImgslotError> {
    if !dir.is_dir() {
        return Err(ImgslotError::NotFound {
            what: "Image directory",
            path: dir.to_path_buf(),
        });
    }

    let mut directory = FileDirectory::new();
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| ImgslotError::DirectoryScan {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() || !is_image_file(entry.path()) {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 filename {:?}", entry.file_name());
            continue;
        };

        if directory.insert(name.to_string()).is_none() {
            debug!("Skipping unnumbered image {}", name);
        }
    }

    debug!(
        "Found {} numbered image(s) in {}",
        directory.len(),
        dir.display()
    );
    Ok(directory)
}

fn read_text(path: &Path, what: &'static str) -> Result<String, ImgslotError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ImgslotError::NotFound {
            what,
            path: path.to_path_buf(),
        },
        _ => ImgslotError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}
