use std::fmt::{Display, Formatter, Result};

/// Connection state as printed by `adb devices`.
/// Only `device` means the unit accepts commands; anything adb invents later
/// is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
  Device,
  Offline,
  Unauthorized,
  Other(String)
}

impl DeviceState {
  pub fn as_str(&self) -> &str {
    match self {
      DeviceState::Device       => "device",
      DeviceState::Offline      => "offline",
      DeviceState::Unauthorized => "unauthorized",
      DeviceState::Other(raw)   => raw
    }
  }

  pub fn is_online(&self) -> bool {
    *self == DeviceState::Device
  }
}

impl From<&str> for DeviceState {
  fn from(raw: &str) -> Self {
    match raw {
      "device"       => DeviceState::Device,
      "offline"      => DeviceState::Offline,
      "unauthorized" => DeviceState::Unauthorized,
      other          => DeviceState::Other(other.to_string())
    }
  }
}

impl Display for DeviceState {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_the_raw_text() {
    for raw in ["device", "offline", "unauthorized", "recovery", "no permissions"] {
      assert_eq!(DeviceState::from(raw).as_str(), raw);
    }
  }

  #[test]
  fn only_device_is_online() {
    assert!(DeviceState::from("device").is_online());
    assert!(!DeviceState::from("offline").is_online());
    assert!(!DeviceState::from("sideload").is_online());
  }
}
