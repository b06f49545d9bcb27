//! sepctl - Software Enhancement Proposal workflow tool
//!
//! sepctl tracks proposals as individual markdown files with YAML
//! frontmatter in a directory of the repository (default `docs/seps`). It
//! can be used two ways:
//!
//! - **CLI**: `sepctl init`, then `sepctl new "Feature"`, `sepctl status`,
//!   and so on; run `sepctl --help` for the full command list.
//! - **Library**: the document model and workflow engine are re-exported
//!   from this crate root; every entry point takes the proposal directory
//!   explicitly, so there is no ambient state to configure.
//!
//! The engine itself lives in `sepctl-proposal`: parsing, scanning,
//! metadata mutation, area-conflict detection, and the next-action
//! recommendation. This crate adds the CLI surface, exit codes, and the
//! feedback log.

pub mod cli;
pub mod exit_codes;
pub mod feedback;

pub use exit_codes::ExitCode;
pub use sepctl_proposal::{
    Conflict, Criterion, Frontmatter, NextAction, Proposal, ProposalError, Status, find_by_number,
    find_conflicts, group_by_status, next_number, recommend, scan,
};
