//! Output page writer.
//!
//! Pages are only rewritten when their content changes, and writes go
//! through a temp file plus rename so a half-written page is never served.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use standings_shared::{Result, StandingsError};

/// What happened to an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// New or changed content was written.
    Written,
    /// The file already held identical content.
    Unchanged,
}

/// Write `content` to `path` unless the file already holds the same bytes.
#[instrument(skip(content), fields(path = %path.display(), bytes = content.len()))]
pub fn write_page(path: &Path, content: &str) -> Result<WriteStatus> {
    let new_hash = sha256_hex(content.as_bytes());

    if let Ok(existing) = std::fs::read(path) {
        if sha256_hex(&existing) == new_hash {
            debug!(sha256 = %new_hash, "content unchanged, not rewriting");
            return Ok(WriteStatus::Unchanged);
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StandingsError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| StandingsError::validation(format!("{} has no file name", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, content).map_err(|e| StandingsError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(StandingsError::io(path, e));
    }

    debug!(sha256 = %new_hash, "wrote page");
    Ok(WriteStatus::Written)
}

/// Hex-encoded SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
