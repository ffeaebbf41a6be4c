use std::{path::Path, process::ExitStatus, time::Duration};

use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Command,
    time,
};

use crate::BebopcError;

/// Captured result of one bebopc invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

async fn drain<R>(mut reader: R) -> Result<Vec<u8>, std::io::Error>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).await?;
    Ok(buffer)
}

pub(crate) fn spawn_with_retry(
    command: &mut Command,
    binary: &Path,
) -> Result<tokio::process::Child, BebopcError> {
    let mut backoff = Duration::from_millis(2);
    for attempt in 0..5 {
        match command.spawn() {
            Ok(child) => return Ok(child),
            Err(source) => {
                let is_busy = matches!(source.kind(), std::io::ErrorKind::ExecutableFileBusy)
                    || source.raw_os_error() == Some(26);
                if is_busy && attempt < 4 {
                    std::thread::sleep(backoff);
                    backoff = std::cmp::min(backoff * 2, Duration::from_millis(50));
                    continue;
                }
                return Err(BebopcError::Spawn {
                    binary: binary.to_path_buf(),
                    source,
                });
            }
        }
    }

    unreachable!("spawn_with_retry should return before exhausting retries")
}

pub(crate) async fn run_command(
    mut command: Command,
    binary: &Path,
    timeout: Option<Duration>,
) -> Result<CommandOutput, BebopcError> {
    command.stdin(std::process::Stdio::null());
    command.stdout(std::process::Stdio::piped());
    command.stderr(std::process::Stdio::piped());
    command.kill_on_drop(true);

    let mut child = spawn_with_retry(&mut command, binary)?;

    let stdout = child.stdout.take().ok_or(BebopcError::MissingStdout)?;
    let stderr = child.stderr.take().ok_or(BebopcError::MissingStderr)?;

    let stdout_task = tokio::spawn(drain(stdout));
    let stderr_task = tokio::spawn(drain(stderr));

    let wait_fut = child.wait();
    let status = if let Some(dur) = timeout {
        time::timeout(dur, wait_fut)
            .await
            .map_err(|_| BebopcError::Timeout { timeout: dur })?
            .map_err(BebopcError::Wait)?
    } else {
        wait_fut.await.map_err(BebopcError::Wait)?
    };

    let stdout = stdout_task
        .await
        .map_err(|e| BebopcError::Join(e.to_string()))?
        .map_err(BebopcError::StdoutRead)?;
    let stderr = stderr_task
        .await
        .map_err(|e| BebopcError::Join(e.to_string()))?
        .map_err(BebopcError::StderrRead)?;

    Ok(CommandOutput {
        status,
        stdout,
        stderr,
    })
}
