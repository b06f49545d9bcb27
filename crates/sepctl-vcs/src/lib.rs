//! Version-control collaborator.
//!
//! Thin wrappers over the `git` CLI used around claim and sync flows. The
//! subprocess is treated as opaque pass/fail; stdio is inherited so git's
//! own output and prompts reach the user directly.

use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Failure of a git subprocess.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("git {command} failed with {status}")]
    Failed {
        command: &'static str,
        status: ExitStatus,
    },
}

/// `git add <path>`.
pub fn add(path: &str) -> Result<(), GitError> {
    run("add", &[path])
}

/// `git commit -m <message>`.
pub fn commit(message: &str) -> Result<(), GitError> {
    run("commit", &["-m", message])
}

/// `git push`.
pub fn push() -> Result<(), GitError> {
    run("push", &[])
}

/// `git pull`.
pub fn pull() -> Result<(), GitError> {
    run("pull", &[])
}

fn run(command: &'static str, args: &[&str]) -> Result<(), GitError> {
    let status = Command::new("git")
        .arg(command)
        .args(args)
        .status()
        .map_err(|source| GitError::Spawn { command, source })?;

    if status.success() {
        Ok(())
    } else {
        Err(GitError::Failed { command, status })
    }
}
