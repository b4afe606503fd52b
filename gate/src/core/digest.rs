//! Category digest composition.
//!
//! A category digest is SHA-256 over the concatenated contents of its matched
//! files, taken in sorted path order. Matching and reading live in
//! `io::hasher`; this module only fixes the order and the hash.

use sha2::{Digest, Sha256};

use crate::core::types::MatchedPath;

/// Digest of a category that matched nothing (SHA-256 of zero bytes).
pub const EMPTY_DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Incremental digest for one category.
#[derive(Clone, Default)]
pub struct CategoryDigest {
    hasher: Sha256,
    bytes: u64,
}

impl CategoryDigest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one file's full contents.
    pub fn update(&mut self, contents: &[u8]) {
        self.hasher.update(contents);
        self.bytes += contents.len() as u64;
    }

    /// Total bytes fed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// Sort matches by reported path, byte-wise.
///
/// Stable, so duplicate matches from overlapping patterns stay adjacent and
/// are all kept.
pub fn sort_matches(matches: &mut [MatchedPath]) {
    matches.sort_by(|left, right| left.display.cmp(&right.display));
}
