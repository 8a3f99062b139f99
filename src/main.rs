mod bridge;
mod config;
mod devices;
mod manifest;
mod uninstall;

use std::{path::PathBuf, time::Duration};
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

use bridge::Adb;
use config::{resolve_adb_from_env, Config};
use devices::{Device, Discoverer, Discovery, Selection};

/// Uninstall an Android project's package from connected devices
#[derive(Parser, Debug)]
#[command(name = "adb-uninstall", version, about, long_about = None)]
struct Cli {
  /// Path to the adb binary
  #[arg(long, value_name = "PATH")]
  adb: Option<PathBuf>,

  /// Android SDK root; adb is taken from its platform-tools
  #[arg(long, value_name = "DIR")]
  sdk: Option<PathBuf>,

  /// Serial number of a device to uninstall from (repeatable)
  #[arg(short, long = "serial", value_name = "SERIAL")]
  serials: Vec<String>,

  /// Uninstall from every online device
  #[arg(long, conflicts_with = "serials")]
  all: bool,

  /// Only list attached devices
  #[arg(long)]
  list: bool,

  /// Module directory holding the AndroidManifest.xml
  #[arg(short, long, value_name = "DIR", default_value = ".")]
  project: PathBuf,

  /// Package to uninstall instead of the one named by the manifest
  #[arg(long, value_name = "NAME")]
  package: Option<String>,

  /// Give up on an adb call after this many seconds
  #[arg(long, value_name = "SECS")]
  timeout: Option<u64>,

  /// Increase output verbosity (-v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8
}

impl Cli {
  fn config(&self) -> Config {
    Config {
      adb: resolve_adb_from_env(self.adb.as_deref(), self.sdk.as_deref()),
      project: self.project.clone(),
      package: self.package.clone(),
      timeout: self.timeout.map(Duration::from_secs)
    }
  }

  fn selection(&self) -> Selection {
    if self.all {
      Selection::AllOnline
    } else if !self.serials.is_empty() {
      Selection::Serials(self.serials.clone())
    } else {
      Selection::Nothing
    }
  }
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::INFO,
    1 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE
  };

  // RUST_LOG, when set, overrides -v
  let filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let subscriber = FmtSubscriber::builder()
    .with_env_filter(filter)
    .without_time()
    .with_target(false)
    .finish();

  if tracing::subscriber::set_global_default(subscriber).is_err() {
    eprintln!("a global tracing subscriber was already installed");
  }
}

fn describe(device: &Device) -> String {
  let system = &device.info.system;
  let mut line = format!("{}\t{}\t{}", device.serial_number, device.state, device.name());

  if let Some(release) = &system.release_version {
    line.push_str(&format!("\tAndroid {}", release));
  }
  if let Some(api) = &system.api_version {
    line.push_str(&format!(" (API {})", api));
  }

  line
}

fn listing(discovery: &Discovery, show_skipped: bool) -> Vec<String> {
  let mut lines: Vec<String> = if discovery.devices.is_empty() {
    vec!["No devices attached.".to_string()]
  } else {
    discovery.devices.iter().map(describe).collect()
  };

  if show_skipped && !discovery.skipped.is_empty() {
    lines.push(format!("Ignored {} unrecognised line(s) from adb:", discovery.skipped.len()));
    lines.extend(discovery.skipped.iter().map(|skipped| format!("  {}", skipped)));
  }

  lines
}

fn print_devices(discovery: &Discovery, show_skipped: bool) {
  for line in listing(discovery, show_skipped) {
    println!("{}", line);
  }
}

async fn run(cli: Cli) -> Result<()> {
  let config = cli.config();
  let adb = Adb::new(&config.adb).with_timeout(config.timeout);

  let discovery = Discoverer::new(&adb)
    .discover()
    .await
    .with_context(|| format!("could not list devices with {}", config.adb.display()))?;

  let selection = cli.selection();
  if cli.list || selection == Selection::Nothing {
    print_devices(&discovery, cli.verbose > 0);
    return Ok(());
  }

  let selected = discovery.select(&selection);
  if selected.is_empty() {
    warn!("no attached device matches the selection, nothing to do");
    return Ok(());
  }

  let package = match config.package {
    Some(package) => package,
    None => manifest::resolve_package_name(&config.project)
      .context("could not determine which package to uninstall")?
  };

  let failures = uninstall::uninstall_all(&adb, &selected, &package).await;
  if !failures.is_empty() {
    bail!("uninstall failed on {} of {} device(s)", failures.len(), selected.len());
  }

  Ok(())
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(e) = run(cli).await {
    error!("{:#}", e);
    std::process::exit(1);
  }
}
