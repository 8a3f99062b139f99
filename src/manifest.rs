use std::{fs, io, path::{Path, PathBuf}};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const MANIFEST_FILE: &str = "AndroidManifest.xml";

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("no AndroidManifest.xml found in {} (looked in src/main and the module root)", module.display())]
  NotFound { module: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error
  },

  #[error("failed to parse {}: {message}", path.display())]
  Parse { path: PathBuf, message: String },

  #[error("{} does not declare a package", path.display())]
  MissingPackage { path: PathBuf }
}

/// Only the root element matters; everything under it is ignored
#[derive(Debug, Deserialize)]
#[serde(rename="manifest")]
struct Manifest {
  package: Option<String>
}

/// Where a module keeps its manifest: Gradle layout first, then the legacy
/// layout with the manifest at the module root.
pub fn candidate_paths(module: &Path) -> [PathBuf; 2] {
  [
    module.join("src").join("main").join(MANIFEST_FILE),
    module.join(MANIFEST_FILE)
  ]
}

pub fn find_manifest(module: &Path) -> Result<PathBuf, ManifestError> {
  candidate_paths(module)
    .into_iter()
    .find(|path| path.is_file())
    .ok_or_else(|| ManifestError::NotFound { module: module.to_path_buf() })
}

/// Reads the `package` attribute of the root `<manifest>` element
pub fn package_from_manifest(path: &Path) -> Result<String, ManifestError> {
  let xml = fs::read_to_string(path)
    .map_err(|source| ManifestError::Io { path: path.to_path_buf(), source })?;

  let manifest: Manifest = serde_xml_rs::from_str(&xml)
    .map_err(|e| ManifestError::Parse { path: path.to_path_buf(), message: e.to_string() })?;

  match manifest.package {
    Some(package) if !package.trim().is_empty() => Ok(package.trim().to_string()),
    _ => Err(ManifestError::MissingPackage { path: path.to_path_buf() })
  }
}

/// Finds the module's manifest and returns the package it declares
pub fn resolve_package_name(module: &Path) -> Result<String, ManifestError> {
  let path = find_manifest(module)?;
  debug!("reading package name from {}", path.display());
  package_from_manifest(&path)
}
