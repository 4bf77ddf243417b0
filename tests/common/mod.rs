#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A scratch project directory with a document, captions and `images/`.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write project file");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("read project file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Create placeholder image files under `images/`.
    pub fn add_images(&self, names: &[&str]) {
        let images = self.path("images");
        fs::create_dir_all(&images).expect("create images dir");
        for name in names {
            fs::write(images.join(name), png_bytes()).expect("write image file");
        }
    }

    pub fn image_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path("images"))
            .expect("list images dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

/// The 8-byte PNG signature; imgslot never decodes images, it only needs
/// files with the right names.
pub fn png_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']
}
