use futures::{stream::BoxStream, StreamExt};
use thiserror::Error;
use tracing::{error, info};

use crate::{bridge::{Bridge, BridgeError}, devices::Device};

#[derive(Debug, Error)]
pub enum UninstallError {
  #[error("no package name to uninstall")]
  EmptyPackage,

  #[error(transparent)]
  Bridge(#[from] BridgeError)
}

/// Human-readable progress, one item per line adb prints
pub type ProgressStream = BoxStream<'static, Result<String, BridgeError>>;

/// Starts `adb -s <serial> uninstall <package>` and relays its output.
pub fn uninstall<B: Bridge>(bridge: &B, device: &Device, package: &str) -> Result<ProgressStream, UninstallError> {
  if package.trim().is_empty() {
    return Err(UninstallError::EmptyPackage);
  }

  let lines = bridge.stream(&["-s", device.serial_number.as_str(), "uninstall", package])?;

  let prefix = format!("Uninstalling {} from {}: ", package, device.name());
  Ok(lines.map(move |line| line.map(|l| format!("{}{}", prefix, l))).boxed())
}

async fn uninstall_from<B: Bridge>(bridge: &B, device: &Device, package: &str) -> Result<(), UninstallError> {
  let mut progress = uninstall(bridge, device, package)?;
  while let Some(line) = progress.next().await {
    info!("{}", line?);
  }
  Ok(())
}

/// Uninstalls from each device in turn, logging adb's output as it arrives.
/// A device that fails does not stop the others; the failures are returned
/// keyed by serial number.
pub async fn uninstall_all<B: Bridge>(bridge: &B, devices: &[Device], package: &str) -> Vec<(String, UninstallError)> {
  let mut failures = vec![];

  for device in devices {
    if let Err(e) = uninstall_from(bridge, device, package).await {
      error!("uninstalling {} from {} failed: {}", package, device.name(), e);
      failures.push((device.serial_number.clone(), e));
    }
  }

  failures
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bridge::scripted::ScriptedBridge;
  use crate::devices::BuildProperties;

  #[tokio::test]
  async fn prefixes_every_line() {
    let bridge = ScriptedBridge::new()
      .on(&["-s", "ABC123", "uninstall", "com.example.app"], "Performing Streamed Uninstall\nSuccess\n");

    let mut device = Device::new("ABC123", "device");
    device.enrich(&BuildProperties::parse("ro.product.manufacturer=Acme\nro.product.model=X1\n"));

    let lines: Vec<String> = uninstall(&bridge, &device, "com.example.app")
      .unwrap()
      .map(|l| l.unwrap())
      .collect()
      .await;

    assert_eq!(lines, vec![
      "Uninstalling com.example.app from Acme X1 (ABC123): Performing Streamed Uninstall",
      "Uninstalling com.example.app from Acme X1 (ABC123): Success"
    ]);
  }

  #[test]
  fn empty_package_runs_nothing() {
    let bridge = ScriptedBridge::new();
    let device = Device::new("ABC123", "device");

    assert!(matches!(uninstall(&bridge, &device, " "), Err(UninstallError::EmptyPackage)));
    assert!(bridge.calls().is_empty());
  }

  #[test]
  fn launch_failure_is_reported() {
    let bridge = ScriptedBridge::new();
    let device = Device::new("ABC123", "device");

    assert!(matches!(uninstall(&bridge, &device, "com.example.app"), Err(UninstallError::Bridge(_))));
  }

  #[tokio::test]
  async fn one_failure_does_not_stop_the_rest() {
    let bridge = ScriptedBridge::new()
      .on(&["-s", "B", "uninstall", "com.example.app"], "Success\n");

    let devices = vec![Device::new("A", "device"), Device::new("B", "device")];
    let failures = uninstall_all(&bridge, &devices, "com.example.app").await;

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "A");
    assert_eq!(bridge.calls(), vec!["-s A uninstall com.example.app", "-s B uninstall com.example.app"]);
  }
}
