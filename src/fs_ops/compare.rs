//! Content identity: size first, then SHA-256 over streamed reads.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use super::BUF_SIZE;

/// True when `src` and `dst` have the same size and the same SHA-256 digest.
///
/// Stat errors are returned untouched so callers can tell an absent destination
/// (`ErrorKind::NotFound`, the normal first-run case) apart from real failures.
pub fn files_identical(src: &Path, dst: &Path) -> io::Result<bool> {
    let dst_meta = fs::metadata(dst)?;
    let src_meta = fs::metadata(src)?;

    if src_meta.len() != dst_meta.len() {
        return Ok(false);
    }

    Ok(file_digest(src)? == file_digest(dst)?)
}

/// SHA-256 of a file, read through a fixed-size buffer.
pub fn file_digest(path: &Path) -> io::Result<[u8; 32]> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().into())
}
