//! Duplicate-name candidates for the `rename` conflict policy.
//!
//! Candidates are "name.ext", "name (2).ext", "name (3).ext", ... The caller walks
//! them in order and stops at the first slot that is free or already holds identical
//! content, so re-running over the same source lands on the same names.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Upper bound on numbered variants tried for one file.
pub const MAX_SUFFIX: u32 = 10_000;

// Typical POSIX/EXT limit, in bytes.
const MAX_FILENAME_LEN: usize = 255;

/// Candidate destinations for `name` inside `dir`, in preference order.
pub fn candidates<'a>(dir: &'a Path, name: &'a OsStr) -> impl Iterator<Item = PathBuf> + 'a {
    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    std::iter::once(dir.join(name)).chain((2..=MAX_SUFFIX).map(move |n| {
        dir.join(build_name_with_suffix(&stem, ext.as_deref(), &format!(" ({n})")))
    }))
}

/// Join `stem + suffix + ["." + ext]`, shortening the stem if the result would
/// exceed the filename limit.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = suffix.len();
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead += 1 + e.len();
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if stem.len() + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        let lossy = stem.to_string_lossy();
        let mut acc = String::new();
        for ch in lossy.chars() {
            if acc.len() + ch.len_utf8() > budget {
                break;
            }
            acc.push(ch);
        }
        if acc.is_empty() {
            acc.push('f');
        }
        stem_os = OsString::from(acc);
    }

    let mut new_name = stem_os;
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}
