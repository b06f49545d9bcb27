//! In-place frontmatter mutation.
//!
//! Mutation re-reads the backing file rather than trusting the in-memory
//! snapshot, so external edits made since scan time are not clobbered
//! (last-write-wins otherwise). Only the delimited metadata block is
//! rewritten; everything after the second delimiter is reattached verbatim.
//! The re-encoded block is canonical, so comments, blank lines, and custom
//! key ordering inside the block are lost on rewrite — accepted behavior.

use std::fs;
use std::str::FromStr;

use camino::Utf8Path;
use sepctl_utils::atomic_write::write_file_atomic;

use crate::document::{FRONTMATTER_MARKER, Proposal};
use crate::error::ProposalError;
use crate::frontmatter::{Frontmatter, Status};

impl Proposal {
    /// Set the lifecycle status.
    ///
    /// The new value is validated against the fixed enumeration before any
    /// file I/O; an unknown value is rejected without touching the file.
    /// On success the in-memory field is updated as well.
    pub fn set_status(&mut self, new_status: &str) -> Result<(), ProposalError> {
        let status = Status::from_str(new_status).map_err(|_| ProposalError::InvalidStatus {
            value: new_status.to_string(),
        })?;
        let canonical = status.to_string();
        rewrite_frontmatter(&self.path, |fm| fm.status = canonical.clone())?;
        self.status = canonical;
        Ok(())
    }

    /// Set the owner. An empty string unassigns.
    pub fn set_assigned(&mut self, owner: &str) -> Result<(), ProposalError> {
        rewrite_frontmatter(&self.path, |fm| fm.assigned = owner.to_string())?;
        self.assigned = owner.to_string();
        Ok(())
    }
}

/// Read-decode-mutate-encode-rewrite cycle for one frontmatter field.
///
/// The file must contain two delimiter occurrences; unlike the parser, a
/// document without them is a hard error here. The whole file is rewritten
/// in a single atomic replace.
fn rewrite_frontmatter(
    path: &Utf8Path,
    apply: impl FnOnce(&mut Frontmatter),
) -> Result<(), ProposalError> {
    let content = fs::read_to_string(path).map_err(|e| ProposalError::io(path, e))?;

    let mut parts = content.splitn(3, FRONTMATTER_MARKER);
    let (Some(_lead), Some(block), Some(tail)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ProposalError::MalformedDocument {
            path: path.to_owned(),
        });
    };

    let mut fm = Frontmatter::decode(block)?;
    apply(&mut fm);
    let encoded = fm.encode()?;

    let rebuilt = format!("{FRONTMATTER_MARKER}\n{encoded}{FRONTMATTER_MARKER}{tail}");
    write_file_atomic(path, &rebuilt).map_err(|e| ProposalError::io(path, e))
}
