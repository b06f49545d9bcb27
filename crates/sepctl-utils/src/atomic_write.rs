//! Atomic whole-file rewrites.
//!
//! Write to a temporary file in the target's directory, fsync, then rename
//! over the target. Content bytes are written exactly as given — callers
//! rely on prose staying byte-identical across a rewrite, so no line-ending
//! normalization happens here.

use std::io::{self, Write};

use camino::Utf8Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` in a single atomic rename.
///
/// The temporary file lives in the same directory as the target so the
/// rename never crosses filesystems.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
