use std::fmt::{Display, Formatter};

mod device_info;
mod device_list;
mod device_state;
mod discovery;

pub use device_info::*;
pub use device_list::*;
pub use device_state::*;
pub use discovery::*;

/// One unit reported by the bridge, plus whatever its build properties said.
/// A fresh set is produced on every discovery and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
  pub serial_number: String,
  pub state: DeviceState,
  pub info: DeviceInfo
}

impl Device {
  pub fn new(serial_number: &str, state: &str) -> Self {
    Device {
      serial_number: serial_number.to_string(),
      state: state.into(),
      info: DeviceInfo::default()
    }
  }

  pub fn enrich(&mut self, props: &BuildProperties) {
    self.info = DeviceInfo::from_properties(props);
  }

  /// e.g. "Google Pixel 7 (2A111FDH200B2K)", or just the serial when nothing else is known
  pub fn name(&self) -> String {
    let product = &self.info.product;
    let label: Vec<&str> = [product.manufacturer.as_deref(), product.model.as_deref()]
      .into_iter()
      .flatten()
      .filter(|part| !part.is_empty())
      .collect();

    if label.is_empty() {
      self.serial_number.clone()
    } else {
      format!("{} ({})", label.join(" "), self.serial_number)
    }
  }
}

/// An input line a parser could not use. Kept so dropped data stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
  /// 1-based position in the parsed output
  pub line_number: usize,
  pub content: String
}

impl SkippedLine {
  pub fn new(line_number: usize, content: &str) -> Self {
    SkippedLine { line_number, content: content.to_string() }
  }
}

impl Display for SkippedLine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "line {}: {:?}", self.line_number, self.content)
  }
}
