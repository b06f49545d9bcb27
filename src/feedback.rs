//! Append-only feedback log.
//!
//! Free-text notes about the tool or a specific SEP, timestamped and
//! appended to a plain log file for later review.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result, ensure};
use camino::Utf8Path;
use chrono::Local;

/// Append one feedback entry. A blank message is rejected.
pub fn record(file: &Utf8Path, message: &str, sep: Option<&str>) -> Result<()> {
    ensure!(!message.trim().is_empty(), "feedback message cannot be empty");

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {parent}"))?;
    }

    let mut log = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(file)
        .with_context(|| format!("failed to open feedback file {file}"))?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M");
    let entry = match sep {
        Some(number) => format!("[{timestamp}] SEP-{number}: {message}\n"),
        None => format!("[{timestamp}] {message}\n"),
    };
    log.write_all(entry.as_bytes())
        .with_context(|| format!("failed to write feedback to {file}"))?;
    Ok(())
}

/// Read the whole log; `None` when nothing has been recorded yet.
pub fn read(file: &Utf8Path) -> Result<Option<String>> {
    match fs::read_to_string(file) {
        Ok(content) if content.is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read feedback file {file}")),
    }
}

/// Remove the log. Missing file counts as already cleared.
pub fn clear(file: &Utf8Path) -> Result<()> {
    match fs::remove_file(file) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to clear feedback file {file}")),
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::*;

    fn log_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("docs").join("feedback.log")).unwrap()
    }

    #[test]
    fn records_and_reads_entries() {
        let dir = TempDir::new().unwrap();
        let file = log_path(&dir);

        record(&file, "the claim command is useful", None).unwrap();
        record(&file, "criteria could be clearer", Some("0001")).unwrap();

        let content = read(&file).unwrap().unwrap();
        assert!(content.contains("the claim command is useful"));
        assert!(content.contains("SEP-0001: criteria could be clearer"));
    }

    #[test]
    fn blank_messages_are_rejected() {
        let dir = TempDir::new().unwrap();
        let file = log_path(&dir);
        assert!(record(&file, "   ", None).is_err());
        assert!(read(&file).unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = log_path(&dir);

        clear(&file).unwrap();
        record(&file, "note", None).unwrap();
        clear(&file).unwrap();
        assert!(read(&file).unwrap().is_none());
    }
}
