#![allow(dead_code)]
use repocat::{DirEntry, EntryKind, EntryMetadata, FileSystem};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
/// In-memory filesystem with failure injection.
#[derive(Debug, Default)]
pub struct MemoryFs {
    root: PathBuf,
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    symlinks: BTreeSet<PathBuf>,
    broken_dirs: BTreeSet<PathBuf>,
    broken_files: BTreeSet<PathBuf>,
}
impl MemoryFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut dirs = BTreeSet::new();
        dirs.insert(root.clone());
        Self {
            root,
            dirs,
            ..Default::default()
        }
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    pub fn file(mut self, rel: &str, content: impl Into<Vec<u8>>) -> Self {
        let path = self.root.join(rel);
        self.add_parents(&path);
        self.files.insert(path, content.into());
        self
    }
    pub fn dir(mut self, rel: &str) -> Self {
        let path = self.root.join(rel);
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }
    pub fn symlink(mut self, rel: &str) -> Self {
        let path = self.root.join(rel);
        self.add_parents(&path);
        self.symlinks.insert(path);
        self
    }
    /// Listing this directory fails with `PermissionDenied`.
    pub fn unlistable(mut self, rel: &str) -> Self {
        self = self.dir(rel);
        self.broken_dirs.insert(self.root.join(rel));
        self
    }
    /// Opening or reading this file fails with `PermissionDenied`.
    pub fn unreadable(mut self, rel: &str) -> Self {
        self = self.file(rel, Vec::new());
        self.broken_files.insert(self.root.join(rel));
        self
    }
    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if !dir.starts_with(&self.root) {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
    }
    fn denied(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("permission denied: {}", path.display()),
        )
    }
    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        )
    }
    fn lookup(&self, path: &Path) -> io::Result<EntryMetadata> {
        if self.dirs.contains(path) {
            return Ok(EntryMetadata { kind: EntryKind::Directory });
        }
        if self.files.contains_key(path) {
            return Ok(EntryMetadata { kind: EntryKind::File });
        }
        Err(Self::not_found(path))
    }
}
impl FileSystem for MemoryFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        if self.broken_files.contains(path) {
            return Err(Self::denied(path));
        }
        match self.files.get(path) {
            Some(content) => Ok(Box::new(Cursor::new(content.as_slice()))),
            None => Err(Self::not_found(path)),
        }
    }
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        if self.broken_dirs.contains(path) {
            return Err(Self::denied(path));
        }
        if !self.dirs.contains(path) {
            return Err(Self::not_found(path));
        }
        let name_of = |p: &PathBuf| {
            p.file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_default()
        };
        // Reverse order so callers cannot rely on listing order.
        let mut entries: Vec<DirEntry> = self
            .dirs
            .iter()
            .filter(|p| p.parent() == Some(path))
            .map(|p| DirEntry::new(name_of(p), true))
            .chain(
                self.files
                    .keys()
                    .chain(self.symlinks.iter())
                    .filter(|p| p.parent() == Some(path))
                    .map(|p| DirEntry::new(name_of(p), false)),
            )
            .collect();
        entries.reverse();
        Ok(entries)
    }
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.open(path)?.read_to_end(&mut buf)?;
        Ok(buf)
    }
    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        if self.symlinks.contains(path) {
            return Ok(EntryMetadata { kind: EntryKind::File });
        }
        self.lookup(path)
    }
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        if self.symlinks.contains(path) {
            return Ok(EntryMetadata { kind: EntryKind::Symlink });
        }
        self.lookup(path)
    }
}
