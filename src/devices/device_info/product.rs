/// Who made the device and what it is sold as
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
  /// `ro.product.manufacturer`
  pub manufacturer: Option<String>,

  /// `ro.product.model`
  pub model: Option<String>
}
