//! Single-pass proposal document parser.
//!
//! A document is line-oriented: an optional frontmatter block between two
//! `---` lines, then prose organized under `## ` headings. The parser reads
//! forward once with no backtracking. Exactly two sections are meaningful to
//! the engine — the rationale prose and the acceptance checklist — everything
//! else is opaque.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ProposalError;
use crate::frontmatter::{Frontmatter, Status};

/// Line that opens and closes the frontmatter block.
pub(crate) const FRONTMATTER_MARKER: &str = "---";

/// Heading label of the rationale section.
const RATIONALE_SECTION: &str = "What & Why";

/// Heading label of the acceptance-criteria checklist.
const CRITERIA_SECTION: &str = "Done When";

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-").unwrap());

/// One acceptance-criteria checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub text: String,
    pub checked: bool,
}

/// One proposal document's parsed state.
///
/// The backing file is the single source of truth; there is no cache. The
/// `status` field is kept as the raw on-disk string so that listing views
/// and rewrites never invent values the file does not carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Proposal {
    /// Zero-padded 4-digit sequence number from the filename, e.g. "0001".
    /// Empty when the filename does not follow the naming convention.
    pub number: String,
    pub title: String,
    pub status: String,
    pub created: String,
    pub depends_on: Vec<String>,
    pub areas: Vec<String>,
    pub assigned: String,
    /// Prose of the rationale section, placeholder lines removed.
    pub rationale: String,
    /// Ordered acceptance-criteria checklist.
    pub criteria: Vec<Criterion>,
    /// Backing file location; stable for the object's lifetime.
    pub path: Utf8PathBuf,
}

impl Proposal {
    /// Parse a proposal file.
    ///
    /// Only I/O failures are errors. A document that never closes its
    /// frontmatter block parses successfully with every metadata field
    /// empty, and a frontmatter block that fails to decode is skipped the
    /// same way — the mutator is the strict path.
    pub fn parse(path: &Utf8Path) -> Result<Proposal, ProposalError> {
        let file = File::open(path).map_err(|e| ProposalError::io(path, e))?;

        let mut proposal = Proposal {
            path: path.to_owned(),
            ..Proposal::default()
        };
        if let Some(captures) = path.file_name().and_then(|name| NUMBER_RE.captures(name)) {
            proposal.number = captures[1].to_string();
        }

        let mut in_frontmatter = false;
        let mut frontmatter_done = false;
        let mut frontmatter_raw = String::new();
        let mut current_section = String::new();
        let mut rationale = String::new();

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| ProposalError::io(path, e))?;

            // The first marker enters capture mode, the second leaves it and
            // decodes exactly once. Any later marker line is ordinary prose.
            if line == FRONTMATTER_MARKER && !frontmatter_done {
                if !in_frontmatter {
                    in_frontmatter = true;
                    continue;
                }
                in_frontmatter = false;
                frontmatter_done = true;
                match Frontmatter::decode(&frontmatter_raw) {
                    Ok(fm) => proposal.apply_frontmatter(fm),
                    Err(err) => {
                        tracing::debug!(%path, %err, "skipping undecodable frontmatter block");
                    }
                }
                continue;
            }

            if in_frontmatter {
                frontmatter_raw.push_str(&line);
                frontmatter_raw.push('\n');
                continue;
            }

            if let Some(label) = line.strip_prefix("## ") {
                current_section = label.to_string();
                continue;
            }

            match current_section.as_str() {
                RATIONALE_SECTION => {
                    if !line.is_empty() && !line.starts_with('[') {
                        rationale.push_str(&line);
                        rationale.push('\n');
                    }
                }
                CRITERIA_SECTION => {
                    if line.starts_with("- [") {
                        let checked = line.starts_with("- [x]") || line.starts_with("- [X]");
                        let text = line.get(5..).unwrap_or("").trim();
                        if !text.is_empty() && !text.starts_with('[') {
                            proposal.criteria.push(Criterion {
                                text: text.to_string(),
                                checked,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        proposal.rationale = rationale.trim().to_string();
        Ok(proposal)
    }

    fn apply_frontmatter(&mut self, fm: Frontmatter) {
        self.title = fm.title;
        self.status = fm.status;
        self.created = fm.created;
        self.depends_on = fm.depends_on;
        self.areas = fm.areas;
        self.assigned = fm.assigned;
    }

    /// Full display id, e.g. "SEP-0001".
    pub fn id(&self) -> String {
        format!("SEP-{}", self.number)
    }

    /// Whether this proposal is neither DONE nor CANCELLED. Unknown status
    /// strings count as live.
    pub fn is_live(&self) -> bool {
        self.status != Status::Done.as_ref() && self.status != Status::Cancelled.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::*;

    pub(crate) fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    pub(crate) fn write_doc(root: &Utf8Path, name: &str, content: &str) -> Utf8PathBuf {
        let path = root.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub(crate) const SAMPLE: &str = "---\n\
title: User Authentication\n\
status: ACCEPTED\n\
created: 2026-01-10\n\
depends_on:\n  - '0001'\n\
areas:\n  - auth/*\n\
assigned: '@alice'\n\
---\n\
\n\
# SEP-0002: User Authentication\n\
\n\
## What & Why\n\
\n\
Passwords are stored in plain text today.\n\
[placeholder that editors replace]\n\
We need hashed credentials.\n\
\n\
## Done When\n\
\n\
- [x] Passwords hashed at rest\n\
- [ ] Session tokens rotate\n\
- [ ] [placeholder criterion]\n\
- [X] Login audit trail exists\n\
\n\
## Notes\n\
\n\
Opaque to the engine.\n";

    #[test]
    fn parses_metadata_sections_and_checklist() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&utf8_root(&dir), "0002-user-authentication.md", SAMPLE);

        let p = Proposal::parse(&path).unwrap();
        assert_eq!(p.number, "0002");
        assert_eq!(p.id(), "SEP-0002");
        assert_eq!(p.title, "User Authentication");
        assert_eq!(p.status, "ACCEPTED");
        assert_eq!(p.created, "2026-01-10");
        assert_eq!(p.depends_on, vec!["0001"]);
        assert_eq!(p.areas, vec!["auth/*"]);
        assert_eq!(p.assigned, "@alice");
        assert_eq!(
            p.rationale,
            "Passwords are stored in plain text today.\nWe need hashed credentials."
        );
        assert_eq!(
            p.criteria,
            vec![
                Criterion { text: "Passwords hashed at rest".to_string(), checked: true },
                Criterion { text: "Session tokens rotate".to_string(), checked: false },
                Criterion { text: "Login audit trail exists".to_string(), checked: true },
            ]
        );
    }

    #[test]
    fn unclosed_frontmatter_degrades_to_empty_metadata() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &utf8_root(&dir),
            "0003-unclosed.md",
            "---\ntitle: Never closed\nstatus: DRAFT\n",
        );

        let p = Proposal::parse(&path).unwrap();
        assert_eq!(p.number, "0003");
        assert_eq!(p.title, "");
        assert_eq!(p.status, "");
        assert!(p.depends_on.is_empty());
    }

    #[test]
    fn undecodable_frontmatter_degrades_to_empty_metadata() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &utf8_root(&dir),
            "0004-bad-yaml.md",
            "---\ntitle: [unclosed\n---\n\n## What & Why\n\nStill readable prose.\n",
        );

        let p = Proposal::parse(&path).unwrap();
        assert_eq!(p.title, "");
        assert_eq!(p.rationale, "Still readable prose.");
    }

    #[test]
    fn third_marker_is_ordinary_prose() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &utf8_root(&dir),
            "0005-markers.md",
            "---\ntitle: Markers\n---\n## What & Why\n\nBefore the rule.\n---\nAfter the rule.\n",
        );

        let p = Proposal::parse(&path).unwrap();
        assert_eq!(p.title, "Markers");
        assert_eq!(p.rationale, "Before the rule.\n---\nAfter the rule.");
    }

    #[test]
    fn nonconforming_filename_leaves_number_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&utf8_root(&dir), "notes.md", SAMPLE);

        let p = Proposal::parse(&path).unwrap();
        assert_eq!(p.number, "");
        assert_eq!(p.title, "User Authentication");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Proposal::parse(&utf8_root(&dir).join("0009-missing.md")).unwrap_err();
        assert!(matches!(err, ProposalError::Io { .. }));
    }

    #[test]
    fn unknown_status_counts_as_live() {
        let mut p = Proposal { status: "WEIRD".to_string(), ..Proposal::default() };
        assert!(p.is_live());
        p.status = "DONE".to_string();
        assert!(!p.is_live());
        p.status = "CANCELLED".to_string();
        assert!(!p.is_live());
    }
}
