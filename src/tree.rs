//! ASCII directory tree for the header of the generated document.

use crate::error::RepocatError;
use crate::fs::{DirEntry, FileSystem, relative_path};
use crate::options::matches_file_types;
use crate::patterns::ExclusionSet;
use std::cmp::Ordering;
use std::path::Path;

/// Line printed before any entry.
pub const ROOT_MARKER: &str = "/";

/// Renders the directory tree below `root`.
///
/// Directories come before files; each group is sorted case-insensitively.
/// Excluded entries are dropped together with their subtree. When
/// `file_types` is non-empty, files whose name does not end with one of the
/// suffixes are dropped, while directories are kept so the shape stays visible.
/// Directory lines end with `/`.
///
/// # Errors
///
/// Returns [`RepocatError::ReadDir`] naming the first directory that could not
/// be listed. No partial tree is returned.
pub fn render_tree(
    fs: &dyn FileSystem,
    root: &Path,
    exclusions: &ExclusionSet,
    file_types: &[String],
) -> Result<String, RepocatError> {
    render_tree_to_depth(fs, root, exclusions, file_types, None)
}

/// Like [`render_tree`], but does not list the contents of directories deeper
/// than `max_depth` (the root's own entries are depth 1).
pub fn render_tree_to_depth(
    fs: &dyn FileSystem,
    root: &Path,
    exclusions: &ExclusionSet,
    file_types: &[String],
    max_depth: Option<usize>,
) -> Result<String, RepocatError> {
    let renderer = TreeRenderer {
        fs,
        root,
        exclusions,
        file_types,
        max_depth,
    };
    let mut out = String::with_capacity(1024);
    out.push_str(ROOT_MARKER);
    out.push('\n');
    renderer.render_dir(root, "", 1, &mut out)?;
    Ok(out)
}

struct TreeRenderer<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    exclusions: &'a ExclusionSet,
    file_types: &'a [String],
    max_depth: Option<usize>,
}

impl TreeRenderer<'_> {
    fn render_dir(
        &self,
        dir: &Path,
        prefix: &str,
        depth: usize,
        out: &mut String,
    ) -> Result<(), RepocatError> {
        let mut entries = self
            .fs
            .read_dir(dir)
            .map_err(|e| RepocatError::read_dir(dir, e))?;
        sort_entries(&mut entries);

        let visible: Vec<DirEntry> = entries
            .into_iter()
            .filter(|entry| {
                let rel = relative_path(self.root, &dir.join(&entry.name));
                if self.exclusions.is_excluded(&rel) {
                    return false;
                }
                entry.is_dir || matches_file_types(&entry.display_name(), self.file_types)
            })
            .collect();

        let total = visible.len();
        for (i, entry) in visible.into_iter().enumerate() {
            let is_last = i + 1 == total;
            let (connector, continuation) = if is_last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            if entry.is_dir {
                out.push_str(&format!("{}{}{}/\n", prefix, connector, entry.display_name()));
                if self.max_depth.is_none_or(|max| depth < max) {
                    let child_prefix = format!("{}{}", prefix, continuation);
                    self.render_dir(&dir.join(&entry.name), &child_prefix, depth + 1, out)?;
                }
            } else {
                out.push_str(&format!("{}{}{}\n", prefix, connector, entry.display_name()));
            }
        }
        Ok(())
    }
}

/// Directories first, then case-insensitive by name. Exact name breaks ties so
/// the order never depends on the listing order.
pub(crate) fn sort_entries(entries: &mut [DirEntry]) {
    entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    });
}
