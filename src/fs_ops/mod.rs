//! Filesystem operations used by the organizer.

pub mod compare;
pub mod duplicate;
pub mod io_copy;
pub mod lock;
pub mod sweep;

pub use compare::{file_digest, files_identical};
pub use io_copy::{copy_streaming, DurabilityMode};
pub use lock::InstanceLock;
pub use sweep::remove_empty_dirs;

/// Buffer size for hashing and copying (1 MiB).
pub const BUF_SIZE: usize = 1024 * 1024;
