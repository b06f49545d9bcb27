//! Embedded scaffold templates.
//!
//! Templates are compiled into the binary with `include_str!`. They carry
//! placeholder tokens — `XXXX` (number), `[Title]`, `YYYY-MM-DD` (creation
//! date) — which the caller substitutes before writing; this crate only
//! provides the bytes.

/// One file scaffolded by `sepctl init`.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    /// File name inside the proposal directory.
    pub name: &'static str,
    pub contents: &'static str,
}

/// Template for new proposal documents.
pub const PROPOSAL_TEMPLATE: &str = include_str!("../templates/SEP-TEMPLATE.md");

/// The process documentation, shipped as SEP-0000.
pub const PROCESS_DOC: &str = include_str!("../templates/0000-sep-process.md");

/// Files scaffolded into the proposal directory by `sepctl init`.
pub const INIT_FILES: &[TemplateFile] = &[
    TemplateFile {
        name: "0000-sep-process.md",
        contents: PROCESS_DOC,
    },
    TemplateFile {
        name: "SEP-TEMPLATE.md",
        contents: PROPOSAL_TEMPLATE,
    },
];
