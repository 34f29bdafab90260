use crate::classify::{Classification, classify};
use crate::error::RepocatError;
use crate::fs::{FileSystem, OsFs, relative_path};
use crate::options::ScanOptions;
use crate::patterns::ExclusionSet;
use crate::tokens::TokenCounter;
use crate::tree::{render_tree_to_depth, sort_entries};
use crate::types::{FileFailure, ScanReport};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
const RULE_WIDTH: usize = 50;
/// Depth-first walk yielding non-excluded files below the root.
///
/// Excluded directories are pruned, so nothing below them is listed. With
/// `recursive` off only the root is listed.
struct Walker<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    exclusions: &'a ExclusionSet,
    recursive: bool,
    stack: Vec<(PathBuf, bool, usize)>,
}
impl<'a> Walker<'a> {
    fn new(
        fs: &'a dyn FileSystem,
        root: &'a Path,
        exclusions: &'a ExclusionSet,
        recursive: bool,
    ) -> Self {
        Self {
            fs,
            root,
            exclusions,
            recursive,
            stack: vec![(root.to_path_buf(), true, 0)],
        }
    }
}
impl Iterator for Walker<'_> {
    type Item = Result<PathBuf, RepocatError>;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, is_dir, depth)) = self.stack.pop() {
            if !is_dir {
                return Some(Ok(path));
            }
            if depth > 0 && !self.recursive {
                continue;
            }
            let mut entries = match self.fs.read_dir(&path) {
                Ok(entries) => entries,
                Err(e) => return Some(Err(RepocatError::read_dir(&path, e))),
            };
            sort_entries(&mut entries);
            for entry in entries.into_iter().rev() {
                let child = path.join(&entry.name);
                if self.exclusions.is_excluded(&relative_path(self.root, &child)) {
                    continue;
                }
                self.stack.push((child, entry.is_dir, depth + 1));
            }
        }
        None
    }
}
struct Emitter<'a, W: Write + ?Sized> {
    fs: &'a dyn FileSystem,
    options: &'a ScanOptions,
    exclusions: &'a ExclusionSet,
    sink: &'a mut W,
    counter: Option<TokenCounter>,
    report: ScanReport,
}
impl<W: Write + ?Sized> Emitter<'_, W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), RepocatError> {
        self.sink.write_all(bytes).map_err(RepocatError::Output)
    }
    fn add_tokens(&mut self, bytes: &[u8]) -> Option<usize> {
        let counter = self.counter.as_ref()?;
        let count = counter.count_bytes(bytes);
        *self.report.tokens.get_or_insert(0) += count;
        Some(count)
    }
    fn run(mut self) -> Result<ScanReport, RepocatError> {
        let options = self.options;
        let root = options.root.as_path();
        match self.fs.metadata(root) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepocatError::RootNotFound(root.to_path_buf()));
            }
            Err(e) => return Err(RepocatError::io(root, e)),
        }
        if options.file_types.is_empty() {
            debug!("No file types specified. Scanning all files.");
        } else {
            debug!("Scanning for file types: {:?}", options.file_types);
        }

        self.write(b"Directory Structure:\n-------------------\n")?;
        let max_depth = if options.recursive { None } else { Some(1) };
        let tree = render_tree_to_depth(
            self.fs,
            root,
            self.exclusions,
            &options.file_types,
            max_depth,
        )?;
        self.write(tree.as_bytes())?;
        self.add_tokens(tree.as_bytes());
        self.write(b"\n\nFile Contents:\n--------------\n")?;

        let walker = Walker::new(self.fs, root, self.exclusions, options.recursive);
        for item in walker {
            match item {
                Ok(path) => self.process_file(&path)?,
                Err(e) => {
                    warn!("Error accessing path: {}", e);
                    let path = match &e {
                        RepocatError::ReadDir { path, .. } => relative_path(root, path),
                        _ => String::new(),
                    };
                    self.report.failures.push(FileFailure {
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }
        self.sink.flush().map_err(RepocatError::Output)?;
        if let Some(total) = self.report.tokens {
            info!("Total tokens: {}", total);
        }
        Ok(self.report)
    }
    fn process_file(&mut self, path: &Path) -> Result<(), RepocatError> {
        let rel = relative_path(&self.options.root, path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.options.accepts_file(&name) {
            return Ok(());
        }
        match classify(self.fs, path) {
            Classification::Plain => self.emit_plain(path, &rel),
            Classification::Symlink => {
                info!("Skipping symlink: {}", rel);
                self.report.files_skipped += 1;
                self.write_skipped(&rel, "Symlink - skipped content", "Skipped - Symlink")
            }
            reason @ (Classification::Binary | Classification::Secret) => {
                info!("Skipping forbidden ({}) file: {}", reason, rel);
                self.report.files_skipped += 1;
                self.write_skipped(&rel, "Binary - skipped content", "Skipped - Binary File")
            }
            Classification::Unreadable(reason) => self.emit_failure(&rel, reason),
        }
    }
    fn write_skipped(&mut self, rel: &str, tag: &str, note: &str) -> Result<(), RepocatError> {
        let block = format!(
            "File: {} ({})\n{}\nContent of {}: ({})\n\n\n",
            rel,
            tag,
            "-".repeat(RULE_WIDTH),
            rel,
            note
        );
        self.write(block.as_bytes())
    }
    fn emit_failure(&mut self, rel: &str, message: String) -> Result<(), RepocatError> {
        warn!("Error processing file {}: {}", rel, message);
        let block = format!(
            "File: {}\n{}\nError reading file: {}. Content skipped.\n\n",
            rel,
            "-".repeat(RULE_WIDTH),
            message
        );
        self.write(block.as_bytes())?;
        self.report.failures.push(FileFailure {
            path: rel.to_string(),
            message,
        });
        Ok(())
    }
    fn emit_plain(&mut self, path: &Path, rel: &str) -> Result<(), RepocatError> {
        let content = match self.fs.read_file(path) {
            Ok(content) => content,
            Err(e) => return self.emit_failure(rel, RepocatError::io(path, e).to_string()),
        };
        let lines = content.iter().filter(|&&b| b == b'\n').count();
        match self.add_tokens(&content) {
            Some(tokens) => debug!("Processing: {} ({} lines, {} tokens)", rel, lines, tokens),
            None => debug!("Processing: {} ({} lines)", rel, lines),
        }
        let header = format!(
            "File: {}\n{}\nContent of {}:\n",
            rel,
            "-".repeat(RULE_WIDTH),
            rel
        );
        self.write(header.as_bytes())?;
        self.write(&content)?;
        self.write(b"\n\n")?;
        self.report.files_emitted += 1;
        Ok(())
    }
}
/// Writes the directory tree and the content blocks of every included file to
/// `sink`, using `fs` for all filesystem access.
///
/// Per-file read failures are annotated inline, logged and collected in
/// [`ScanReport::failures`]; the scan continues past them.
///
/// # Errors
///
/// Fails if the root does not exist, a directory cannot be listed while
/// rendering the tree, the tokenizer cannot be loaded, or writing to `sink`
/// fails.
pub fn emit<W: Write + ?Sized>(
    fs: &dyn FileSystem,
    options: &ScanOptions,
    exclusions: &ExclusionSet,
    sink: &mut W,
) -> Result<ScanReport, RepocatError> {
    debug!("Starting scan with root: {}", options.root.display());
    let counter = if options.count_tokens {
        Some(TokenCounter::new(options.encoding)?)
    } else {
        None
    };
    Emitter {
        fs,
        options,
        exclusions,
        sink,
        counter,
        report: ScanReport::default(),
    }
    .run()
}
/// Scans the real filesystem: builds the exclusion set from `options` and
/// calls [`emit`].
pub fn repocat<W: Write + ?Sized>(
    options: &ScanOptions,
    sink: &mut W,
) -> Result<ScanReport, RepocatError> {
    let fs = OsFs;
    let exclusions = ExclusionSet::from_options(&fs, options)?;
    emit(&fs, options, &exclusions, sink)
}
