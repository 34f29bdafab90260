//! # Repocat
//!
//! `repocat` walks a directory tree and writes one text document made of an
//! ASCII directory listing followed by the contents of every selected file,
//! ready to paste into a language-model prompt.
//!
//! For every path it decides whether the entry is shown in the tree, whether
//! its bytes are emitted, and how it is annotated when they are not:
//!
//! - exclusion patterns from built-in defaults, an optional `.llmignore`, ad hoc
//!   patterns and an optional bundled list of test-file globs ([`ExclusionSet`]);
//! - dotfiles and dot-directories are hidden unless requested otherwise;
//! - an optional suffix filter (`.go`, `.rs`, ...) applied to files only;
//! - binary files, files containing a PEM private key and symlinks are listed
//!   but their content is skipped ([`classify`]).
//!
//! All filesystem access goes through a [`FileSystem`] value passed in by the
//! caller; [`OsFs`] is the real one. Diagnostics are emitted with `tracing` and
//! never mixed into the document.
//!
//! # Example
//!
//! ```no_run
//! use repocat::{ScanBuilder, repocat};
//!
//! let options = ScanBuilder::new("./project")
//!     .file_types(vec![".go".into()])
//!     .exclude_tests(true)
//!     .exclude_patterns(vec!["vendor/".into()])
//!     .build();
//!
//! let mut out = Vec::new();
//! let report = repocat(&options, &mut out).expect("scan failed");
//! println!("{} files emitted", report.files_emitted);
//! ```

mod classify;
mod emit;
mod error;
mod fs;
mod options;
mod patterns;
mod tokens;
mod tree;
mod types;

pub use classify::{CHUNK_SIZE, Classification, SECRET_KEY_MARKER, classify, classify_bytes};
pub use emit::{emit, repocat};
pub use error::RepocatError;
pub use fs::{DirEntry, EntryKind, EntryMetadata, FileSystem, OsFs, relative_path};
pub use options::{DEFAULT_IGNORE_FILE, ScanBuilder, ScanOptions};
pub use patterns::{
    DEFAULT_PATTERNS, ExclusionSet, ExclusionSetBuilder, default_patterns, is_excluded,
    parse_ignore_file, test_patterns,
};
pub use tokens::{Encoding, TokenCounter};
pub use tree::{ROOT_MARKER, render_tree, render_tree_to_depth};
pub use types::{FileFailure, ScanReport};
