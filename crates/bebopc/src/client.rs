use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::process::Command;
use tracing::debug;

use crate::{process, BebopcError};

#[derive(Debug, Clone)]
pub struct BebopcClientBuilder {
    binary: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Default for BebopcClientBuilder {
    fn default() -> Self {
        Self {
            binary: None,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl BebopcClientBuilder {
    /// Pins the bebopc binary instead of resolving it from the environment.
    pub fn binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = Some(binary.into());
        self
    }

    /// Bounds each invocation; `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> BebopcClient {
        BebopcClient {
            binary: self.binary,
            timeout: self.timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BebopcClient {
    binary: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl BebopcClient {
    pub fn builder() -> BebopcClientBuilder {
        BebopcClientBuilder::default()
    }

    /// Whether the resolved binary currently exists on this system.
    ///
    /// Bare names are searched on `PATH`; anything with a directory component
    /// is checked directly. Cheap enough to call per encode attempt.
    pub fn is_available(&self) -> bool {
        let binary = self.resolve_binary();
        let has_dir = binary
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty());
        if has_dir || binary.is_absolute() {
            return binary.is_file();
        }
        let Some(paths) = env::var_os("PATH") else {
            return false;
        };
        env::split_paths(&paths).any(|dir| dir.join(&binary).is_file())
    }

    /// Encodes `payload_json` against the struct `type_name` declared in the
    /// schema file, returning the binary frame from bebopc's stdout.
    ///
    /// The payload is staged into a fresh uniquely-named temp file so
    /// concurrent invocations sharing a temp directory cannot collide; the
    /// file is removed when this call returns, success or failure.
    pub async fn encode(
        &self,
        schema: &Path,
        type_name: &str,
        payload_json: &[u8],
    ) -> Result<Vec<u8>, BebopcError> {
        let mut staged = tempfile::Builder::new()
            .prefix("bebopc_payload_")
            .suffix(".json")
            .tempfile()
            .map_err(BebopcError::PayloadStage)?;
        staged
            .write_all(payload_json)
            .map_err(BebopcError::PayloadStage)?;
        staged.flush().map_err(BebopcError::PayloadStage)?;

        let binary = self.resolve_binary();
        let mut command = Command::new(&binary);
        command
            .arg("encode")
            .arg("--schema")
            .arg(schema)
            .arg("--type")
            .arg(type_name)
            .arg("--json")
            .arg(staged.path());

        let output = process::run_command(command, &binary, self.timeout).await?;
        if !output.status.success() {
            return Err(BebopcError::NonZeroExit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr)
                    .trim_end()
                    .to_string(),
            });
        }

        debug!(
            binary = ?binary,
            type_name,
            frame_bytes = output.stdout.len(),
            "received bebopc frame"
        );
        Ok(output.stdout)
    }

    fn resolve_binary(&self) -> PathBuf {
        if let Some(b) = self.binary.as_ref() {
            return b.clone();
        }
        if let Ok(v) = env::var("BEBOPC_BINARY") {
            if !v.trim().is_empty() {
                return PathBuf::from(v);
            }
        }
        PathBuf::from("bebopc")
    }
}
