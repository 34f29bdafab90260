//! Filesystem capability passed explicitly to every component that touches disk.
//!
//! The tree renderer, the classifier and the emitter never call `std::fs`
//! directly; they go through a [`FileSystem`] so tests can substitute a fake
//! that fails on demand.

use std::borrow::Cow;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{MAIN_SEPARATOR, Path};

/// What a path points at, as reported by `stat`/`lstat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

/// The subset of file metadata the scanner needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    pub kind: EntryKind,
}

impl EntryMetadata {
    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// One entry of a directory listing.
///
/// `is_dir` describes the entry itself, not a symlink target, so a link to a
/// directory is listed as a non-directory and is never descended into.
///
/// `name` is kept exactly as the OS returned it so child paths can be rebuilt
/// from it; names that are not valid UTF-8 are only made lossy for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<OsString>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }

    /// The name as printed in the tree and matched against patterns.
    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }
}

pub trait FileSystem {
    /// Open a file for sequential reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;
    /// List a directory. Order is unspecified.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Metadata following symlinks.
    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata>;
    /// Metadata of the path itself.
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(path)?))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            entries.push(DirEntry {
                name: entry.file_name(),
                is_dir: file_type.is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        fs::metadata(path).map(convert_metadata)
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        fs::symlink_metadata(path).map(convert_metadata)
    }
}

fn convert_metadata(meta: fs::Metadata) -> EntryMetadata {
    let file_type = meta.file_type();
    let kind = if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };
    EntryMetadata { kind }
}

/// Path of `path` relative to `root`, joined with the platform separator.
///
/// Both the tree renderer and the content walk label and match entries with
/// this string, so an exclusion behaves the same in both phases.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for component in relative.components() {
        if !out.is_empty() {
            out.push(MAIN_SEPARATOR);
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}
