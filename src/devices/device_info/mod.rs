mod build_props;
mod product;
mod system;

pub use build_props::*;
pub use product::*;
pub use system::*;

pub const MANUFACTURER: &str = "ro.product.manufacturer";
pub const MODEL: &str = "ro.product.model";
pub const RELEASE_VERSION: &str = "ro.build.version.release";
pub const API_VERSION: &str = "ro.build.version.sdk";

/// Descriptive fields read from a device's build properties.
/// Every field is optional: the read may fail or the key may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
  pub product: Product,
  pub system: System
}

impl DeviceInfo {
  pub fn from_properties(props: &BuildProperties) -> Self {
    DeviceInfo {
      product: Product {
        manufacturer: props.get(MANUFACTURER).map(str::to_string),
        model: props.get(MODEL).map(str::to_string)
      },
      system: System {
        release_version: props.get(RELEASE_VERSION).map(str::to_string),
        api_version: props.get(API_VERSION).map(str::to_string)
      }
    }
  }
}
