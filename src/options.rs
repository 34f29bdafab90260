use crate::tokens::Encoding;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
pub const DEFAULT_IGNORE_FILE: &str = ".llmignore";
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub file_types: Vec<String>,
    pub recursive: bool,
    pub verbose: bool,
    pub exclude_tests: bool,
    pub exclude_patterns: Vec<String>,
    pub ignore_file: Option<PathBuf>,
    pub include_hidden: bool,
    pub count_tokens: bool,
    pub encoding: Encoding,
}
impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            file_types: Vec::new(),
            recursive: true,
            verbose: false,
            exclude_tests: false,
            exclude_patterns: Vec::new(),
            ignore_file: Some(PathBuf::from(DEFAULT_IGNORE_FILE)),
            include_hidden: false,
            count_tokens: false,
            encoding: Encoding::default(),
        }
    }
}
impl ScanOptions {
    /// Ignore file location; relative paths resolve against `root`.
    pub fn ignore_file_path(&self) -> Option<PathBuf> {
        self.ignore_file.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                self.root.join(path)
            }
        })
    }
    /// Whether a file name passes the suffix filter. An empty filter accepts everything.
    pub fn accepts_file(&self, name: &str) -> bool {
        matches_file_types(name, &self.file_types)
    }
}
pub(crate) fn matches_file_types(name: &str, file_types: &[String]) -> bool {
    file_types.is_empty() || file_types.iter().any(|ext| name.ends_with(ext.as_str()))
}
#[derive(Debug, Default)]
pub struct ScanBuilder {
    options: ScanOptions,
}
impl ScanBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ScanOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn file_types(mut self, file_types: Vec<String>) -> Self {
        self.options.file_types = file_types;
        self
    }
    pub fn recursive(mut self, yes: bool) -> Self {
        self.options.recursive = yes;
        self
    }
    pub fn verbose(mut self, yes: bool) -> Self {
        self.options.verbose = yes;
        self
    }
    pub fn exclude_tests(mut self, yes: bool) -> Self {
        self.options.exclude_tests = yes;
        self
    }
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.exclude_patterns = patterns;
        self
    }
    pub fn ignore_file(mut self, path: Option<PathBuf>) -> Self {
        self.options.ignore_file = path;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn count_tokens(mut self, yes: bool) -> Self {
        self.options.count_tokens = yes;
        self
    }
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.options.encoding = encoding;
        self
    }
    pub fn build(self) -> ScanOptions {
        self.options
    }
}
