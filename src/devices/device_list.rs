use tracing::debug;

use super::{Device, SkippedLine};

const HEADER_MARKER: &str = "list of devices";

/// One line of `adb devices` output after the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLine {
  Device(Device),
  Skipped(SkippedLine)
}

/// Lazily parses `adb devices` output.
///
/// Everything up to and including the first line containing "list of devices"
/// (any case) is preamble, e.g. daemon start-up chatter. Without that header
/// nothing is produced. Blank lines are ignored; a line needs a non-empty serial
/// and a non-empty state separated by a tab, any further fields are ignored.
pub fn entries(output: &str) -> impl Iterator<Item = ListLine> + '_ {
  output
    .lines()
    .enumerate()
    .skip_while(|(_, line)| !line.to_lowercase().contains(HEADER_MARKER))
    .skip(1)
    .filter(|(_, line)| !line.is_empty())
    .map(|(index, line)| {
      let mut fields = line.split('\t');
      match (fields.next(), fields.next()) {
        (Some(serial), Some(state)) if !serial.is_empty() && !state.is_empty() => ListLine::Device(Device::new(serial, state)),
        _ => ListLine::Skipped(SkippedLine::new(index + 1, line))
      }
    })
}

/// Devices listed by the bridge, in the order it printed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceList {
  pub devices: Vec<Device>,
  pub skipped: Vec<SkippedLine>
}

pub fn parse_device_list(output: &str) -> DeviceList {
  let mut list = DeviceList::default();

  for entry in entries(output) {
    match entry {
      ListLine::Device(device) => list.devices.push(device),
      ListLine::Skipped(skipped) => {
        debug!("skipping device list {}", skipped);
        list.skipped.push(skipped);
      }
    }
  }

  list
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::devices::DeviceState;

  fn pairs(list: &DeviceList) -> Vec<(&str, &str)> {
    list.devices.iter().map(|d| (d.serial_number.as_str(), d.state.as_str())).collect()
  }

  #[test]
  fn keeps_input_order() {
    let output = "List of devices attached\nZX1\tdevice\nemulator-5554\toffline\nR58M\tunauthorized\n";
    let list = parse_device_list(output);

    assert_eq!(pairs(&list), vec![("ZX1", "device"), ("emulator-5554", "offline"), ("R58M", "unauthorized")]);
    assert_eq!(list.devices[1].state, DeviceState::Offline);
    assert!(list.skipped.is_empty());
  }

  #[test]
  fn no_header_means_no_devices() {
    let list = parse_device_list("ZX1\tdevice\nR58M\tdevice\n");
    assert!(list.devices.is_empty());
    assert!(list.skipped.is_empty());

    assert!(parse_device_list("").devices.is_empty());
  }

  #[test]
  fn preamble_before_header_is_ignored() {
    let output = "* daemon not running; starting now at tcp:5037\n* daemon started successfully\nLIST OF DEVICES ATTACHED\nABC\tdevice\n";
    assert_eq!(pairs(&parse_device_list(output)), vec![("ABC", "device")]);
  }

  #[test]
  fn single_field_line_is_skipped() {
    let valid = parse_device_list("List of devices attached\nA\tdevice\nB\tdevice\n");
    let with_bad = parse_device_list("List of devices attached\nA\tdevice\nB device\n");

    assert_eq!(with_bad.devices.len(), valid.devices.len() - 1);
    assert_eq!(with_bad.skipped, vec![SkippedLine::new(3, "B device")]);
  }

  #[test]
  fn empty_serial_is_skipped() {
    let list = parse_device_list("List of devices attached\n\tdevice\n");
    assert!(list.devices.is_empty());
    assert_eq!(list.skipped.len(), 1);
  }

  #[test]
  fn trailing_tab_is_skipped() {
    let list = parse_device_list("List of devices attached\nABC\t\nDEF\tdevice\n");
    assert_eq!(pairs(&list), vec![("DEF", "device")]);
    assert_eq!(list.skipped, vec![SkippedLine::new(2, "ABC\t")]);
  }

  #[test]
  fn blank_lines_are_not_skipped_lines() {
    let list = parse_device_list("List of devices attached\n\nABC123\tdevice\n\n\n");
    assert_eq!(pairs(&list), vec![("ABC123", "device")]);
    assert!(list.skipped.is_empty());
  }

  #[test]
  fn extra_fields_are_ignored() {
    let list = parse_device_list("List of devices attached\nABC\tdevice\tusb:1-1\n");
    assert_eq!(pairs(&list), vec![("ABC", "device")]);
  }

  #[test]
  fn crlf_output_parses() {
    let list = parse_device_list("List of devices attached\r\nABC\tdevice\r\n\r\n");
    assert_eq!(pairs(&list), vec![("ABC", "device")]);
  }

  #[test]
  fn only_the_first_header_is_consumed() {
    let list = parse_device_list("List of devices attached\nList of devices attached\n");
    assert_eq!(list.skipped, vec![SkippedLine::new(2, "List of devices attached")]);
  }
}
