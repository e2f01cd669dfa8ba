/*!
 * Package Manager
 * Install, list and remove packages under `root/packages`
 *
 * Packages are ordinary folders built with the engine's creation
 * primitives: one folder per package holding a `VERSION` file and the
 * package's files. Fetching manifests is delegated to a `PackageSource`.
 */

use ahash::RandomState;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::core::limits::{PACKAGES_FOLDER, PACKAGE_VERSION_FILE};
use crate::persistence::FileEntry;
use crate::vfs::{EntityKind, FolderId, Vfs, VfsError, VfsResult};

/// Where package manifests come from
pub trait PackageSource {
    /// Version installed when none is requested
    fn latest_version(&self, package: &str) -> VfsResult<String>;

    /// Files making up `package` at `version`
    fn fetch(&self, package: &str, version: &str) -> VfsResult<Vec<FileEntry>>;
}

#[derive(Debug, Clone, Default)]
struct Listing {
    latest: String,
    versions: HashMap<String, Vec<FileEntry>, RandomState>,
}

/// Package source backed by an in-memory catalogue
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    packages: HashMap<String, Listing, RandomState>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version of a package; the most recently published is the latest
    pub fn publish(&mut self, package: &str, version: &str, files: Vec<FileEntry>) -> &mut Self {
        let listing = self.packages.entry(package.to_string()).or_default();
        listing.latest = version.to_string();
        listing.versions.insert(version.to_string(), files);
        self
    }
}

impl PackageSource for MemorySource {
    fn latest_version(&self, package: &str) -> VfsResult<String> {
        self.packages
            .get(package)
            .map(|listing| listing.latest.clone())
            .ok_or_else(|| VfsError::not_found(EntityKind::Package, package))
    }

    fn fetch(&self, package: &str, version: &str) -> VfsResult<Vec<FileEntry>> {
        self.packages
            .get(package)
            .and_then(|listing| listing.versions.get(version))
            .cloned()
            .ok_or_else(|| VfsError::not_found(EntityKind::Package, format!("{package}@{version}")))
    }
}

/// `name` or `name@version` as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub version: Option<String>,
}

impl PackageSpec {
    pub fn parse(input: &str) -> VfsResult<Self> {
        let (name, version) = match input.split_once('@') {
            Some((name, version)) => (name, Some(version.to_string())),
            None => (input, None),
        };
        if name.is_empty() {
            return Err(VfsError::InvalidArgument("No package name provided".into()));
        }
        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

/// `major.minor` or `major.minor.patch`
pub fn is_valid_version(version: &str) -> bool {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    VERSION
        .get_or_init(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").expect("version pattern is valid"))
        .is_match(version)
}

/// The `packages` folder under the root
pub fn packages_folder(vfs: &Vfs) -> VfsResult<FolderId> {
    vfs.tree()
        .child_folder(vfs.root(), PACKAGES_FOLDER)
        .ok_or_else(|| VfsError::not_found(EntityKind::Folder, PACKAGES_FOLDER))
}

/// Install a package, returning the installed version
///
/// Files in the manifest that collide with one another are skipped. The
/// caller flushes.
pub fn install(vfs: &mut Vfs, source: &dyn PackageSource, spec: &str) -> VfsResult<String> {
    let spec = PackageSpec::parse(spec)?;
    let packages = packages_folder(vfs)?;

    if vfs.tree().child_folder(packages, &spec.name).is_some() {
        return Err(VfsError::already_exists(EntityKind::Package, spec.name));
    }

    let version = match spec.version {
        Some(version) => version,
        None => source.latest_version(&spec.name)?,
    };
    if !is_valid_version(&version) {
        return Err(VfsError::InvalidArgument(format!("invalid version {version}")));
    }

    let files = source.fetch(&spec.name, &version)?;
    let folder = vfs.create_folder(packages, &spec.name)?;
    vfs.create_file_with_contents(folder, PACKAGE_VERSION_FILE, version.clone())?;

    for file in files {
        let full_name = file.full_name();
        if let Err(e) = vfs.create_file_with_contents(folder, &full_name, file.contents) {
            warn!(package = %spec.name, file = %full_name, error = %e, "Skipping package file");
        }
    }

    info!(package = %spec.name, version = %version, "Package installed");
    Ok(version)
}

/// Remove an installed package
pub fn remove(vfs: &mut Vfs, name: &str) -> VfsResult<()> {
    let packages = packages_folder(vfs)?;
    if vfs.tree().child_folder(packages, name).is_none() {
        return Err(VfsError::not_found(EntityKind::Package, name));
    }
    vfs.remove_folder(packages, name)?;
    info!(package = %name, "Package removed");
    Ok(())
}

/// Installed package names in install order
pub fn list(vfs: &Vfs) -> VfsResult<Vec<String>> {
    let packages = packages_folder(vfs)?;
    Ok(vfs
        .list(packages)?
        .into_iter()
        .filter(|entry| entry.is_folder())
        .map(|entry| entry.name)
        .collect())
}

/// Version recorded in an installed package's `VERSION` file
pub fn installed_version(vfs: &Vfs, name: &str) -> Option<String> {
    let packages = packages_folder(vfs).ok()?;
    let folder = vfs.tree().child_folder(packages, name)?;
    let file = vfs.tree().child_file(folder, PACKAGE_VERSION_FILE)?;
    vfs.file_contents(file)
        .ok()
        .map(|contents| contents.trim_end().to_string())
}
