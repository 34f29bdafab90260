//! Token counting for the generated document.
//!
//! Uses tiktoken-rs BPE tables, which ship inside the crate, so counting never
//! touches the network.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};

use crate::error::RepocatError;

/// Token encoding to use for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// cl100k_base: GPT-4, GPT-3.5-turbo
    #[default]
    Cl100kBase,
    /// o200k_base: GPT-4o and later
    O200kBase,
    /// p50k_base: Codex, text-davinci-002/003
    P50kBase,
    /// r50k_base: GPT-3
    R50kBase,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Cl100kBase => write!(f, "cl100k_base"),
            Encoding::O200kBase => write!(f, "o200k_base"),
            Encoding::P50kBase => write!(f, "p50k_base"),
            Encoding::R50kBase => write!(f, "r50k_base"),
        }
    }
}

impl std::str::FromStr for Encoding {
    type Err = String;

    /// Accepts an encoding name or an OpenAI model name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cl100k" | "cl100k_base" => return Ok(Encoding::Cl100kBase),
            "o200k" | "o200k_base" => return Ok(Encoding::O200kBase),
            "p50k" | "p50k_base" => return Ok(Encoding::P50kBase),
            "r50k" | "r50k_base" | "gpt2" => return Ok(Encoding::R50kBase),
            _ => {}
        }
        match get_tokenizer(s) {
            Some(Tokenizer::Cl100kBase) => Ok(Encoding::Cl100kBase),
            Some(Tokenizer::O200kBase) => Ok(Encoding::O200kBase),
            Some(Tokenizer::P50kBase | Tokenizer::P50kEdit) => Ok(Encoding::P50kBase),
            Some(Tokenizer::R50kBase | Tokenizer::Gpt2) => Ok(Encoding::R50kBase),
            #[allow(unreachable_patterns)]
            Some(_) | None => Err(format!("unknown model or encoding: {}", s)),
        }
    }
}

// Cached tokenizers - initialized once per encoding
static CL100K: OnceLock<Option<CoreBPE>> = OnceLock::new();
static O200K: OnceLock<Option<CoreBPE>> = OnceLock::new();
static P50K: OnceLock<Option<CoreBPE>> = OnceLock::new();
static R50K: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn get_bpe(encoding: Encoding) -> Option<&'static CoreBPE> {
    match encoding {
        Encoding::Cl100kBase => CL100K
            .get_or_init(|| tiktoken_rs::cl100k_base().ok())
            .as_ref(),
        Encoding::O200kBase => O200K
            .get_or_init(|| tiktoken_rs::o200k_base().ok())
            .as_ref(),
        Encoding::P50kBase => P50K
            .get_or_init(|| tiktoken_rs::p50k_base().ok())
            .as_ref(),
        Encoding::R50kBase => R50K
            .get_or_init(|| tiktoken_rs::r50k_base().ok())
            .as_ref(),
    }
}

/// Reusable token counter bound to one encoding.
///
/// # Examples
///
/// ```
/// use repocat::{Encoding, TokenCounter};
///
/// let counter = TokenCounter::new(Encoding::Cl100kBase).unwrap();
/// assert!(counter.count("Hello, world!") > 0);
/// ```
pub struct TokenCounter {
    encoding: Encoding,
    bpe: &'static CoreBPE,
}

impl TokenCounter {
    /// Load the tokenizer for `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`RepocatError::Tokenizer`] if the BPE table cannot be built.
    pub fn new(encoding: Encoding) -> Result<Self, RepocatError> {
        let bpe = get_bpe(encoding)
            .ok_or_else(|| RepocatError::Tokenizer(format!("failed to load {}", encoding)))?;
        Ok(Self { encoding, bpe })
    }

    /// Count tokens in the given text.
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Count tokens in raw bytes, replacing invalid UTF-8.
    pub fn count_bytes(&self, bytes: &[u8]) -> usize {
        self.count(&String::from_utf8_lossy(bytes))
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoding", &self.encoding)
            .finish()
    }
}
