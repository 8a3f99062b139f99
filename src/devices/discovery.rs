use tracing::{debug, info, warn};

use crate::bridge::{Bridge, BridgeError};
use super::{parse_device_list, BuildProperties, Device, SkippedLine};

const BUILD_PROP_PATH: &str = "/system/build.prop";

/// Result of one discovery pass
#[derive(Debug, Clone, Default)]
pub struct Discovery {
  pub devices: Vec<Device>,

  /// Lines of `adb devices` output that did not describe a device
  pub skipped: Vec<SkippedLine>
}

/// Which discovered devices a run should act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
  Nothing,

  /// Every device that is online
  AllOnline,

  /// These serial numbers, in this order
  Serials(Vec<String>)
}

impl Discovery {
  pub fn find(&self, serial_number: &str) -> Option<&Device> {
    self.devices.iter().find(|d| d.serial_number == serial_number)
  }

  /// Resolves a selection against what was discovered. Serials that were not
  /// discovered are reported and left out; devices that are not online are
  /// reported but kept, since the user asked for them by name.
  pub fn select(&self, selection: &Selection) -> Vec<Device> {
    match selection {
      Selection::Nothing => vec![],
      Selection::AllOnline => self.devices.iter().filter(|d| d.state.is_online()).cloned().collect(),
      Selection::Serials(serials) => {
        let mut selected: Vec<Device> = vec![];
        for serial in serials {
          if selected.iter().any(|d| &d.serial_number == serial) { continue; }

          match self.find(serial) {
            Some(device) => {
              if !device.state.is_online() {
                warn!("{} is {}, adb may refuse to talk to it", device.name(), device.state);
              }
              selected.push(device.clone());
            },
            None => warn!("device {} is not attached, skipping it", serial)
          }
        }
        selected
      }
    }
  }
}

pub struct Discoverer<'a, B> {
  bridge: &'a B
}

impl<'a, B: Bridge> Discoverer<'a, B> {
  pub fn new(bridge: &'a B) -> Self {
    Discoverer { bridge }
  }

  /// Lists attached devices, then reads each one's build properties in turn.
  /// Only a failure to list is an error; a device whose properties can't be
  /// read is still reported, just without descriptive fields.
  pub async fn discover(&self) -> Result<Discovery, BridgeError> {
    let output = self.bridge.capture(&["devices"]).await?;
    let list = parse_device_list(&output);

    if !list.skipped.is_empty() {
      warn!("ignored {} unrecognised line(s) in device list", list.skipped.len());
    }

    let mut devices = Vec::with_capacity(list.devices.len());
    for mut device in list.devices {
      self.lookup_device_info(&mut device).await;
      devices.push(device);
    }

    info!("discovered {} device(s)", devices.len());
    Ok(Discovery { devices, skipped: list.skipped })
  }

  async fn lookup_device_info(&self, device: &mut Device) {
    let args = ["-s", device.serial_number.as_str(), "shell", "cat", BUILD_PROP_PATH];

    let result = self.bridge.capture(&args).await;

    match result {
      Ok(output) => {
        let props = BuildProperties::parse(&output);
        if props.is_empty() {
          warn!("{} reported no build properties", device.serial_number);
        } else {
          debug!("{}: {} properties, {} skipped", device.serial_number, props.len(), props.skipped.len());
        }
        device.enrich(&props);
      },
      Err(e) => warn!("could not read properties of {}: {}", device.serial_number, e)
    }
  }
}
