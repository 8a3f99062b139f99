use std::collections::HashMap;
use tracing::debug;

use crate::devices::SkippedLine;

/// One line of `build.prop` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyLine<'a> {
  Property { key: &'a str, value: &'a str },

  /// Had an `=` but did not split into exactly a key and a value
  Skipped(SkippedLine)
}

/// Lazily classifies every `key=value` line of `output`.
///
/// The line is split on *every* `=` and kept only when that yields exactly two
/// parts, so a value that itself contains `=` is dropped rather than truncated.
/// Lines without any `=` (comments, blanks) are not property lines at all and
/// produce nothing.
pub fn property_lines(output: &str) -> impl Iterator<Item = PropertyLine<'_>> {
  output
    .lines()
    .enumerate()
    .filter(|(_, line)| line.contains('='))
    .map(|(index, line)| {
      let parts: Vec<&str> = line.split('=').collect();
      match parts[..] {
        [key, value] => PropertyLine::Property { key, value },
        _ => PropertyLine::Skipped(SkippedLine::new(index + 1, line))
      }
    })
}

/// Parsed build properties of one device. Later assignments of a key win.
#[derive(Debug, Clone, Default)]
pub struct BuildProperties {
  values: HashMap<String, String>,
  pub skipped: Vec<SkippedLine>
}

impl BuildProperties {
  pub fn parse(output: &str) -> Self {
    let mut props = BuildProperties::default();

    for line in property_lines(output) {
      match line {
        PropertyLine::Property { key, value } => {
          props.values.insert(key.to_string(), value.to_string());
        },
        PropertyLine::Skipped(skipped) => {
          debug!("skipping property {}", skipped);
          props.skipped.push(skipped);
        }
      }
    }

    props
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize { self.values.len() }

  pub fn is_empty(&self) -> bool { self.values.is_empty() }
}
