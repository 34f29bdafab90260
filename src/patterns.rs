//! Exclusion rules deciding whether a relative path is hidden from the tree and
//! from the content section.
//!
//! Pattern forms:
//!
//! - `/name/`, `/name` and `name/` are prefix rules: the path equals `name`
//!   or starts with `name` plus a separator. `temp/` hides `temp` and
//!   `temp/a.txt` but neither `temporary/c.txt` nor `src/temp/b.txt`.
//! - Anything else is a glob (`*`, `?`, `[...]`) tried against the whole
//!   relative path and against every single segment. `*` never crosses a
//!   separator.
//!
//! Independently of the patterns, any segment starting with `.` is excluded
//! unless hidden entries were requested. There is no negation: one match
//! anywhere in the set excludes the path.

use std::collections::BTreeSet;
use std::io::{self, BufRead, BufReader};
use std::path::{MAIN_SEPARATOR, Path};
use std::sync::OnceLock;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::error::RepocatError;
use crate::fs::FileSystem;
use crate::options::ScanOptions;

/// Patterns every scan starts from.
pub const DEFAULT_PATTERNS: &[&str] = &[".git", ".svn", ".idea", ".vscode", "go.sum"];

const BUNDLED_TEST_PATTERNS: &str = include_str!("../assets/test-patterns.txt");

static TEST_PATTERNS: OnceLock<Vec<String>> = OnceLock::new();

pub fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Test-file globs for common ecosystems, parsed once from the bundled list.
pub fn test_patterns() -> &'static [String] {
    TEST_PATTERNS.get_or_init(|| parse_pattern_list(BUNDLED_TEST_PATTERNS))
}

/// Parse the bundled list format: `#` starts a comment anywhere on a line.
fn parse_pattern_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an ignore file: one pattern per line, surrounding whitespace trimmed,
/// blank lines and lines starting with `#` skipped.
pub fn parse_ignore_file(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut patterns = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        patterns.push(line.to_string());
    }
    Ok(patterns)
}

fn matches_prefix(path: &str, name: &str) -> bool {
    path == name || starts_with_dir(path, name)
}

fn starts_with_dir(path: &str, name: &str) -> bool {
    path.strip_prefix(name)
        .is_some_and(|rest| rest.starts_with(MAIN_SEPARATOR))
}

fn to_native(pattern: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        pattern.to_string()
    } else {
        pattern.replace('/', &MAIN_SEPARATOR.to_string())
    }
}

/// Compiled, immutable set of exclusion patterns.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: BTreeSet<String>,
    /// Names taken from `/name/`, `/name` and `name/`, with native separators.
    prefixes: Vec<String>,
    globs: GlobSet,
    exclude_hidden: bool,
}

impl ExclusionSet {
    pub fn builder() -> ExclusionSetBuilder {
        ExclusionSetBuilder::default()
    }

    /// Assemble the set a scan with `options` uses: defaults, the ignore file,
    /// ad hoc patterns and, if requested, the bundled test patterns.
    pub fn from_options(
        fs: &dyn FileSystem,
        options: &ScanOptions,
    ) -> Result<Self, RepocatError> {
        let mut builder = Self::builder()
            .defaults()
            .include_hidden(options.include_hidden);
        if let Some(path) = options.ignore_file_path() {
            builder = builder.ignore_file(fs, &path)?;
        }
        if !options.exclude_patterns.is_empty() {
            debug!(
                "Added {} custom exclusion patterns",
                options.exclude_patterns.len()
            );
            builder = builder.patterns(options.exclude_patterns.iter().cloned());
        }
        if options.exclude_tests {
            debug!("Excluded {} test patterns", test_patterns().len());
            builder = builder.test_patterns();
        }
        builder.build()
    }

    pub fn is_excluded(&self, rel_path: &str) -> bool {
        if rel_path.is_empty() {
            return false;
        }
        if self.exclude_hidden && rel_path.split(MAIN_SEPARATOR).any(|s| s.starts_with('.')) {
            return true;
        }
        if self.prefixes.iter().any(|name| matches_prefix(rel_path, name)) {
            return true;
        }
        if self.globs.is_empty() {
            return false;
        }
        self.globs.is_match(rel_path)
            || rel_path
                .split(MAIN_SEPARATOR)
                .any(|segment| self.globs.is_match(segment))
    }

    /// The source patterns, sorted.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            patterns: BTreeSet::new(),
            prefixes: Vec::new(),
            globs: GlobSet::empty(),
            exclude_hidden: true,
        }
    }
}

/// Shorthand for [`ExclusionSet::is_excluded`].
pub fn is_excluded(rel_path: &str, set: &ExclusionSet) -> bool {
    set.is_excluded(rel_path)
}

#[derive(Debug, Clone, Default)]
pub struct ExclusionSetBuilder {
    patterns: BTreeSet<String>,
    include_hidden: bool,
}

impl ExclusionSetBuilder {
    pub fn defaults(self) -> Self {
        self.patterns(default_patterns())
    }
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.insert(pattern.into());
        self
    }
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }
    pub fn test_patterns(self) -> Self {
        self.patterns(test_patterns().iter().cloned())
    }
    /// Disable the built-in dotfile rule.
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.include_hidden = yes;
        self
    }
    /// Merge patterns from an ignore file. A missing file is not an error.
    pub fn ignore_file(self, fs: &dyn FileSystem, path: &Path) -> Result<Self, RepocatError> {
        let reader = match fs.open(path) {
            Ok(reader) => reader,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No exclusion file at {}", path.display());
                return Ok(self);
            }
            Err(source) => {
                return Err(RepocatError::IgnoreFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let patterns =
            parse_ignore_file(BufReader::new(reader)).map_err(|source| RepocatError::IgnoreFile {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "Loaded {} patterns from {}",
            patterns.len(),
            path.display()
        );
        Ok(self.patterns(patterns))
    }
    pub fn build(self) -> Result<ExclusionSet, RepocatError> {
        let mut prefixes = Vec::new();
        let mut glob_builder = GlobSetBuilder::new();
        for pattern in &self.patterns {
            let anchored = pattern.strip_prefix('/');
            let directory = pattern.strip_suffix('/');
            match (anchored, directory) {
                (Some(rest), _) => {
                    let name = rest.strip_suffix('/').unwrap_or(rest);
                    if !name.is_empty() {
                        prefixes.push(to_native(name));
                    }
                }
                (None, Some(name)) => {
                    if !name.is_empty() {
                        prefixes.push(to_native(name));
                    }
                }
                (None, None) => {
                    let glob = GlobBuilder::new(pattern)
                        .literal_separator(true)
                        .build()
                        .map_err(|source| RepocatError::InvalidPattern {
                            pattern: pattern.clone(),
                            source,
                        })?;
                    glob_builder.add(glob);
                }
            }
        }
        let globs = glob_builder
            .build()
            .map_err(|source| RepocatError::InvalidPattern {
                pattern: self.patterns.iter().cloned().collect::<Vec<_>>().join(", "),
                source,
            })?;
        Ok(ExclusionSet {
            patterns: self.patterns,
            prefixes,
            globs,
            exclude_hidden: !self.include_hidden,
        })
    }
}
