//! Streaming copy.
//!
//! Features:
//! - Buffered I/O with large (1 MiB) buffers; files are never loaded whole.
//! - Replaces an existing destination (callers decide beforehand whether that is wanted).
//! - Replicates the source permission bits onto the destination.
//! - Optional full fsync, used before a source file is deleted.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::BUF_SIZE;

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurabilityMode {
    /// Flush to the OS page cache only.
    Data,
    /// Force data and metadata to stable storage (`sync_all`).
    Full,
}

/// Copy `src` -> `dst`, then apply the source's permissions to `dst`.
/// Returns the number of bytes written.
pub fn copy_streaming(src: &Path, dst: &Path, mode: DurabilityMode) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let src_perms = src_f.metadata()?.permissions();
    let dst_f = File::create(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    if mode == DurabilityMode::Full {
        writer.get_ref().sync_all()?;
    }
    drop(writer);

    fs::set_permissions(dst, src_perms)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_small_file_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("src.jpg");
        let dst_path = dir.path().join("dst.jpg");
        let data = b"hello world";
        fs::write(&src_path, data).unwrap();

        let n = copy_streaming(&src_path, &dst_path, DurabilityMode::Data).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(fs::read(&dst_path).unwrap(), data);
    }

    #[test]
    fn copy_zero_length_ok() {
        let dir = tempdir().unwrap();
        let src_path = dir.path().join("empty.mov");
        let dst_path = dir.path().join("out.mov");
        File::create(&src_path).unwrap();

        let n = copy_streaming(&src_path, &dst_path, DurabilityMode::Full).unwrap();
        assert_eq!(n, 0);
        assert_eq!(fs::metadata(&dst_path).unwrap().len(), 0);
    }

    #[test]
    fn replaces_existing_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("new.png");
        let dst = dir.path().join("old.png");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"older and longer").unwrap();
        copy_streaming(&src, &dst, DurabilityMode::Data).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn large_file_copy_boundary() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("big.mp4");
        let dst = dir.path().join("big.out");
        let size = 2 * BUF_SIZE + 123;
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_streaming(&src, &dst, DurabilityMode::Full).unwrap();
        assert_eq!(n as usize, size);
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[cfg(unix)]
    #[test]
    fn permissions_follow_source() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let src = dir.path().join("perm.jpg");
        let dst = dir.path().join("perm.out");
        fs::write(&src, b"perm").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o640)).unwrap();
        copy_streaming(&src, &dst, DurabilityMode::Data).unwrap();
        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
