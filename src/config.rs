use std::{env, path::{Path, PathBuf}, time::Duration};

pub const PLATFORM_TOOLS_DIR: &str = "platform-tools";

/// Settings for one run, gathered from flags and the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  /// The adb binary to run
  pub adb: PathBuf,

  /// Module directory whose manifest names the package
  pub project: PathBuf,

  /// Overrides the manifest lookup when set
  pub package: Option<String>,

  pub timeout: Option<Duration>
}

fn adb_binary() -> &'static str {
  if cfg!(windows) { "adb.exe" } else { "adb" }
}

/// `<sdk>/platform-tools/adb`
pub fn adb_in_sdk(sdk: &Path) -> PathBuf {
  sdk.join(PLATFORM_TOOLS_DIR).join(adb_binary())
}

/// Picks the adb binary: an explicit path, else the one in the given SDK, else
/// the SDK named by `ANDROID_HOME` or `ANDROID_SDK_ROOT`, else plain `adb`
/// resolved through `PATH`.
pub fn resolve_adb(explicit: Option<&Path>, sdk: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
  if let Some(path) = explicit {
    return path.to_path_buf();
  }

  if let Some(sdk) = sdk {
    return adb_in_sdk(sdk);
  }

  ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
    .into_iter()
    .filter_map(|var| lookup(var))
    .filter(|value| !value.is_empty())
    .map(|root| adb_in_sdk(Path::new(&root)))
    .find(|candidate| candidate.is_file())
    .unwrap_or_else(|| PathBuf::from(adb_binary()))
}

/// [`resolve_adb`] against the process environment
pub fn resolve_adb_from_env(explicit: Option<&Path>, sdk: Option<&Path>) -> PathBuf {
  resolve_adb(explicit, sdk, |var| env::var(var).ok())
}
