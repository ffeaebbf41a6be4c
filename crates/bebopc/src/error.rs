use std::{path::PathBuf, process::ExitStatus, time::Duration};

use thiserror::Error;

/// Errors that may occur while invoking the bebopc CLI.
#[derive(Debug, Error)]
pub enum BebopcError {
    #[error("failed to spawn bebopc process (binary={binary:?}): {source}")]
    Spawn {
        binary: PathBuf,
        source: std::io::Error,
    },
    #[error("bebopc timed out after {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("failed waiting for bebopc process: {0}")]
    Wait(std::io::Error),
    #[error("bebopc exited with {status}: {stderr}")]
    NonZeroExit { status: ExitStatus, stderr: String },
    #[error("failed reading stdout: {0}")]
    StdoutRead(std::io::Error),
    #[error("failed reading stderr: {0}")]
    StderrRead(std::io::Error),
    #[error("internal error: missing stdout pipe")]
    MissingStdout,
    #[error("internal error: missing stderr pipe")]
    MissingStderr,
    #[error("internal error: join failure: {0}")]
    Join(String),
    #[error("failed to stage payload temp file: {0}")]
    PayloadStage(std::io::Error),
}
