use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Checksum strings are prefixed with the algorithm so the lock file format
/// can survive a future digest change.
pub const CHECKSUM_PREFIX: &str = "sha256:";

/// Compute the SHA-256 hash of a byte slice, returning a lowercase hex string.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Compute the SHA-256 hash of a file, returning a lowercase hex string.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the prefixed content checksum recorded in lock entries.
pub fn content_checksum(content: &str) -> String {
    format!("{CHECKSUM_PREFIX}{}", sha256_bytes(content.as_bytes()))
}
