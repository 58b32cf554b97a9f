// src/checksum/hash.rs

//! BLAKE3 digests for change-set checksums.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::debug;

/// Compute the hash of a single file.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut file =
        File::open(path).with_context(|| format!("opening file for checksum: {:?}", path))?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("reading file for checksum: {:?}", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Incremental digest over a sequence of labelled fields.
///
/// Every field is written as `len:label=value\n` so that moving bytes from
/// one field to the next always changes the digest.
#[derive(Default)]
pub struct ChecksumBuilder {
    hasher: Hasher,
}

impl ChecksumBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, label: &str, value: &str) -> &mut Self {
        let entry = format!("{label}={value}");
        self.hasher.update(entry.len().to_string().as_bytes());
        self.hasher.update(b":");
        self.hasher.update(entry.as_bytes());
        self.hasher.update(b"\n");
        self
    }

    /// Fold in the content of an external file.
    pub fn file(&mut self, path: &Path) -> Result<&mut Self> {
        let file_hash = compute_file_hash(path)?;
        debug!(path = ?path, hash = %file_hash, "hashed external file");
        self.field("file", &file_hash);
        Ok(self)
    }

    pub fn finish(&self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}
