//! Exit code constants for the sepctl CLI.
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General failure (I/O, malformed document, git) |
//! | 2 | `USAGE` | Invalid arguments or field values |
//! | 3 | `NOT_FOUND` | Requested SEP number has no matching file |

use sepctl_proposal::ProposalError;

/// Type-safe process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const INTERNAL: ExitCode = ExitCode(1);
    pub const USAGE: ExitCode = ExitCode(2);
    pub const NOT_FOUND: ExitCode = ExitCode(3);

    /// Numeric value for `std::process::exit`.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Classify a failure bubbled up from command execution.
    pub fn from_error(err: &anyhow::Error) -> ExitCode {
        match err.downcast_ref::<ProposalError>() {
            Some(ProposalError::NotFound { .. }) => ExitCode::NOT_FOUND,
            Some(ProposalError::InvalidStatus { .. }) => ExitCode::USAGE,
            _ => ExitCode::INTERNAL,
        }
    }
}
