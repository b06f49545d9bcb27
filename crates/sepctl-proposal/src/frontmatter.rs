//! Frontmatter codec: the delimited metadata block at the top of a proposal.
//!
//! Decoding is permissive — unknown or absent fields become defaults and a
//! blank block decodes to the default record; only structurally invalid YAML
//! is an error. Encoding is canonical: deterministic field order and
//! formatting, so repeated encode/decode cycles converge.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::error::ProposalError;

/// Lifecycle states of a proposal.
///
/// Stored in frontmatter as the uppercase name. [`Frontmatter::status`] stays
/// a raw string so unknown on-disk values survive a rewrite untouched; this
/// enum is the validation and grouping surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Draft,
    Accepted,
    Blocked,
    Cancelled,
    Done,
}

impl Status {
    /// Fixed order for grouped listings.
    pub const DISPLAY_ORDER: [Status; 5] = [
        Status::Accepted,
        Status::Draft,
        Status::Blocked,
        Status::Done,
        Status::Cancelled,
    ];

    /// Whether a proposal in this status can still claim areas or be
    /// recommended. DONE and CANCELLED proposals are retired.
    pub fn is_live(self) -> bool {
        !matches!(self, Status::Done | Status::Cancelled)
    }
}

/// The metadata record carried in a proposal's frontmatter block.
///
/// `areas` and `assigned` are omitted from the encoded form when empty;
/// `depends_on` is always emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub areas: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub assigned: String,
}

impl Frontmatter {
    /// Decode a raw frontmatter block.
    ///
    /// A blank block is valid and decodes to the default record.
    pub fn decode(raw: &str) -> Result<Self, ProposalError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Encode to the canonical block form (struct field order, trailing
    /// newline, no delimiters).
    pub fn encode(&self) -> Result<String, ProposalError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
