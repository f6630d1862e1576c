//! Slash-delimited path helpers for decomposition output.
//!
//! Datastream refs and catalog entries carry relative paths with `/`
//! separators regardless of host platform, so these helpers work on
//! strings rather than [`std::path::Path`].

use std::fs::DirBuilder;
#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

use crate::{Error, Result};

/// Maximum accepted length, in bytes, of a path passed to
/// [`ensure_directory_path`].
pub const MAX_PATH_LEN: usize = 1024;

/// Create every directory prefix of `path`, including `path` itself.
///
/// Prefixes are taken at each `/`; already-existing directories are
/// fine. Directories are created with owner-only permissions. A path
/// longer than [`MAX_PATH_LEN`] fails before anything is created, and
/// a failing segment is propagated with the segment named.
pub fn ensure_directory_path(path: &str) -> Result<()> {
    if path.len() > MAX_PATH_LEN {
        return Err(Error::PathTooLong {
            len: path.len(),
            max: MAX_PATH_LEN,
        });
    }

    let bytes = path.as_bytes();
    for i in 0..=bytes.len() {
        if i != bytes.len() && bytes[i] != b'/' {
            continue;
        }
        let prefix = &path[..i];
        if prefix.is_empty() || prefix == "." {
            continue;
        }

        let mut builder = DirBuilder::new();
        #[cfg(unix)]
        builder.mode(0o700);

        if let Err(e) = builder.create(prefix) {
            if e.kind() != std::io::ErrorKind::AlreadyExists {
                return Err(Error::CreateDir {
                    segment: prefix.to_string(),
                    source: e,
                });
            }
        }
    }

    Ok(())
}

/// Split a path into its directory portion and final segment, following
/// POSIX `dirname`/`basename` semantics: trailing slashes collapse, and
/// a path without a directory component yields `"."`.
pub fn split_dir_and_base(path: &str) -> (String, String) {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') {
            ("/".to_string(), "/".to_string())
        } else {
            (".".to_string(), ".".to_string())
        };
    }

    match trimmed.rfind('/') {
        Some(0) => ("/".to_string(), trimmed[1..].to_string()),
        Some(idx) => {
            let dir = trimmed[..idx].trim_end_matches('/');
            let dir = if dir.is_empty() { "/" } else { dir };
            (dir.to_string(), trimmed[idx + 1..].to_string())
        }
        None => (".".to_string(), trimmed.to_string()),
    }
}
