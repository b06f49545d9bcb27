//! Directory-backed proposal store: scanning, lookup, number allocation.
//!
//! There is no cache or index; every operation is a fresh linear scan of the
//! directory. One malformed file never prevents listing the rest.

use std::collections::BTreeMap;

use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::Proposal;
use crate::error::ProposalError;

/// Files matching `NNNN-<slug>.md` are proposals; everything else is
/// invisible to the store.
static FILENAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-.*\.md$").unwrap());

/// Scan a directory for proposal files and parse each one.
///
/// Entries are ordered by file name, so scan order equals id order. A file
/// that fails to parse is skipped with a debug log; a directory that cannot
/// be read is a hard error.
pub fn scan(dir: &Utf8Path) -> Result<Vec<Proposal>, ProposalError> {
    let mut paths = Vec::new();
    for entry in dir.read_dir_utf8().map_err(|e| ProposalError::io(dir, e))? {
        let entry = entry.map_err(|e| ProposalError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| ProposalError::io(dir, e))?;
        if file_type.is_dir() || !FILENAME_RE.is_match(entry.file_name()) {
            continue;
        }
        paths.push(entry.into_path());
    }
    paths.sort();

    let mut proposals = Vec::new();
    for path in paths {
        match Proposal::parse(&path) {
            Ok(proposal) => proposals.push(proposal),
            Err(err) => tracing::debug!(%path, %err, "skipping unparseable proposal file"),
        }
    }
    Ok(proposals)
}

/// Find a proposal by sequence number, zero-padding short input ("7" finds
/// "0007").
pub fn find_by_number(dir: &Utf8Path, number: &str) -> Result<Proposal, ProposalError> {
    let padded = pad_number(number);
    scan(dir)?
        .into_iter()
        .find(|p| p.number == padded)
        .ok_or(ProposalError::NotFound { number: padded })
}

/// Allocate the next sequence number: maximum existing + 1, or "0001" when
/// the directory is missing or holds no proposals. Retired numbers are never
/// reused and gaps are never filled.
pub fn next_number(dir: &Utf8Path) -> Result<String, ProposalError> {
    let proposals = match scan(dir) {
        Ok(proposals) => proposals,
        Err(ProposalError::Io { ref source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Vec::new()
        }
        Err(err) => return Err(err),
    };

    let max = proposals
        .iter()
        .filter_map(|p| p.number.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    Ok(format!("{:04}", max + 1))
}

/// Group proposals by their raw status string.
pub fn group_by_status(proposals: &[Proposal]) -> BTreeMap<&str, Vec<&Proposal>> {
    let mut groups: BTreeMap<&str, Vec<&Proposal>> = BTreeMap::new();
    for proposal in proposals {
        groups.entry(proposal.status.as_str()).or_default().push(proposal);
    }
    groups
}

fn pad_number(number: &str) -> String {
    format!("{number:0>4}")
}
