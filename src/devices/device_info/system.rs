/// The Android build running on the device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct System {
  /// User-facing release, `ro.build.version.release` (e.g. "12")
  pub release_version: Option<String>,

  /// SDK level, `ro.build.version.sdk` (e.g. "31")
  pub api_version: Option<String>
}
