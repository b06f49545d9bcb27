//! Proposal document model and workflow engine.
//!
//! A proposal (SEP) is a markdown document with a YAML frontmatter block:
//! machine-readable metadata between two `---` delimiter lines, followed by
//! free-form prose. This crate owns everything with real invariants:
//!
//! - [`frontmatter`] — the metadata codec (permissive decode, canonical encode)
//! - [`document`] — the single-pass document parser
//! - [`store`] — directory scanning, lookup, and number allocation
//! - [`mutate`] — in-place metadata rewrites that leave prose byte-identical
//! - [`conflict`] — pairwise area-overlap detection between live proposals
//! - [`recommend`] — selection of the single next actionable proposal
//!
//! The crate is synchronous and filesystem-backed; the directory of documents
//! is the single source of truth and every listing operation re-parses it.
//! Library code returns [`ProposalError`] and never terminates the process.

pub mod conflict;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod mutate;
pub mod recommend;
pub mod store;

pub use conflict::{Conflict, find_conflicts};
pub use document::{Criterion, Proposal};
pub use error::ProposalError;
pub use frontmatter::{Frontmatter, Status};
pub use recommend::{NextAction, recommend};
pub use store::{find_by_number, group_by_status, next_number, scan};
