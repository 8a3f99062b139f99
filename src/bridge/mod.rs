use std::{io, process::ExitStatus, time::Duration};
use futures::stream::BoxStream;
use thiserror::Error;

mod adb;

pub use adb::*;

#[cfg(test)]
pub(crate) mod scripted;

/// Lazily produced stdout lines of a running bridge command
pub type LineStream = BoxStream<'static, Result<String, BridgeError>>;

#[derive(Debug, Error)]
pub enum BridgeError {
  #[error("failed to launch `{command}`: {source}")]
  Spawn {
    command: String,
    #[source]
    source: io::Error
  },

  #[error("`{command}` exited with {status}: {stderr}")]
  Failed {
    command: String,
    status: ExitStatus,
    stderr: String
  },

  #[error("`{command}` did not finish within {}s", limit.as_secs())]
  TimedOut {
    command: String,
    limit: Duration
  },

  #[error("failed to read output of `{command}`: {source}")]
  Read {
    command: String,
    #[source]
    source: io::Error
  }
}

/// The external device-bridge tool, reduced to the two ways we talk to it.
///
/// Everything that parses bridge output only ever sees text, so the parsers
/// can be driven by captured output without a real tool or device attached.
#[allow(async_fn_in_trait)]
pub trait Bridge {
  /// Runs the tool to completion and returns everything it printed on stdout.
  async fn capture(&self, args: &[&str]) -> Result<String, BridgeError>;

  /// Starts the tool and hands back its stdout one line at a time.
  /// A non-zero exit surfaces as the final item of the stream.
  fn stream(&self, args: &[&str]) -> Result<LineStream, BridgeError>;
}

/// How a command line is shown in logs and errors
pub(crate) fn display_command(program: &str, args: &[&str]) -> String {
  std::iter::once(program)
    .chain(args.iter().copied())
    .collect::<Vec<_>>()
    .join(" ")
}
