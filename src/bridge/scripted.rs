use std::{cell::RefCell, collections::HashMap, io};
use futures::{stream, StreamExt};

use super::{display_command, Bridge, BridgeError, LineStream};

/// In-memory bridge that replays canned stdout per command line.
/// Unscripted command lines fail as if the binary could not be launched.
#[derive(Debug, Default)]
pub(crate) struct ScriptedBridge {
  outputs: HashMap<String, String>,
  calls: RefCell<Vec<String>>
}

impl ScriptedBridge {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn on(mut self, args: &[&str], stdout: &str) -> Self {
    self.outputs.insert(args.join(" "), stdout.to_string());
    self
  }

  /// Every command line run so far, in order
  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }

  fn lookup(&self, args: &[&str]) -> Result<String, BridgeError> {
    let key = args.join(" ");
    self.calls.borrow_mut().push(key.clone());

    self.outputs.get(&key).cloned().ok_or_else(|| BridgeError::Spawn {
      command: display_command("adb", args),
      source: io::Error::new(io::ErrorKind::NotFound, "no scripted output")
    })
  }
}

impl Bridge for ScriptedBridge {
  async fn capture(&self, args: &[&str]) -> Result<String, BridgeError> {
    self.lookup(args)
  }

  fn stream(&self, args: &[&str]) -> Result<LineStream, BridgeError> {
    let lines: Vec<_> = self.lookup(args)?.lines().map(|l| Ok(l.to_string())).collect();
    Ok(stream::iter(lines).boxed())
  }
}
