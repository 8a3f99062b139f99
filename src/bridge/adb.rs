use std::{path::PathBuf, process::Stdio, time::Duration};
use futures::{stream, StreamExt};
use tokio::{io::{AsyncBufReadExt, AsyncReadExt, BufReader}, process::Command, time::timeout};
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, trace};

use super::{display_command, Bridge, BridgeError, LineStream};

/// The `adb` binary of an Android SDK (or whichever one is on `PATH`)
#[derive(Debug, Clone)]
pub struct Adb {
  program: PathBuf,
  timeout: Option<Duration>
}

impl Adb {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Adb { program: program.into(), timeout: None }
  }

  /// Upper bound for `capture` calls. Without one a hung adb hangs us too.
  pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
    self.timeout = limit;
    self
  }

  fn command(&self, args: &[&str]) -> Command {
    let mut command = Command::new(&self.program);
    command
      .args(args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true);
    command
  }

  fn describe(&self, args: &[&str]) -> String {
    display_command(&self.program.to_string_lossy(), args)
  }
}

impl Bridge for Adb {
  async fn capture(&self, args: &[&str]) -> Result<String, BridgeError> {
    let command = self.describe(args);
    debug!("running {}", command);

    let mut process = self.command(args);
    let run = process.output();
    let output = match self.timeout {
      Some(limit) => timeout(limit, run)
        .await
        .map_err(|_| BridgeError::TimedOut { command: command.clone(), limit })?,
      None => run.await
    }
    .map_err(|source| BridgeError::Spawn { command: command.clone(), source })?;

    if !output.status.success() {
      return Err(BridgeError::Failed {
        command,
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string()
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    trace!("{} printed {} bytes", command, stdout.len());
    Ok(stdout)
  }

  /// Spawns a task to collect stderr, so this needs a running tokio runtime.
  fn stream(&self, args: &[&str]) -> Result<LineStream, BridgeError> {
    let command = self.describe(args);
    debug!("streaming {}", command);

    let mut child = self
      .command(args)
      .spawn()
      .map_err(|source| BridgeError::Spawn { command: command.clone(), source })?;

    // piped above, so always present
    let stdout = match child.stdout.take() {
      Some(stdout) => stdout,
      None => return Ok(stream::empty().boxed())
    };

    let read_command = command.clone();
    let lines = LinesStream::new(BufReader::new(stdout).lines())
      .map(move |line| line.map_err(|source| BridgeError::Read { command: read_command.clone(), source }));

    // stderr is drained alongside stdout, otherwise a chatty child blocks on a full pipe
    let stderr = child.stderr.take();
    let stderr_task = tokio::spawn(async move {
      let mut buf = Vec::new();
      if let Some(mut stderr) = stderr {
        let _ = stderr.read_to_end(&mut buf).await;
      }
      String::from_utf8_lossy(&buf).trim().to_string()
    });

    // once stdout is drained, reap the child and turn a bad exit into a trailing error
    let exit = stream::once(async move {
      let status = child.wait().await;
      let stderr = stderr_task.await.unwrap_or_default();

      match status {
        Ok(status) if status.success() => None,
        Ok(status) => Some(Err(BridgeError::Failed { command, status, stderr })),
        Err(source) => Some(Err(BridgeError::Read { command, source }))
      }
    })
    .filter_map(|item| async move { item });

    Ok(lines.chain(exit).boxed())
  }
}
