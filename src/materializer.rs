//! Copying a template into the work directory and renaming its placeholder paths.
//!
//! Materialization is two passes. [`copy_tree`] reproduces the template verbatim,
//! then [`rename_tree`] walks the copy level by level. At each level it renames the
//! direct children whose names carry a placeholder and relocates the `com/example`
//! package directory. It then re-lists the level and descends into the resulting
//! subdirectories.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::constants::markers;
use crate::error::{Error, Result};
use crate::request::{validate_package, GenerationRequest};

/// Name of the sibling directory a package subtree is parked in while it moves.
const PACKAGE_STAGING_DIR: &str = ".modgen-package-staging";

/// Recursively copies `source` into `destination`.
///
/// # Errors
/// * `Error::MissingTemplate` if `source` is not a directory
/// * `Error::StaleState` if `destination` already exists
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if !source.is_dir() {
        return Err(Error::MissingTemplate { template_dir: source.display().to_string() });
    }
    if destination.exists() {
        return Err(Error::StaleState { path: destination.display().to_string() });
    }

    // Pre-order walk: a directory is always yielded before its contents.
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::IoError(std::io::Error::other(e)))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            debug!("Creating directory {}", target.display());
            fs::create_dir(&target)?;
        } else {
            debug!("Copying {} to {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Name substitutions applied to every path segment of the materialized tree.
#[derive(Debug)]
struct RenameRules {
    mod_id: String,
    compact_name: String,
    package_segments: Vec<String>,
}

impl RenameRules {
    /// Fails on packages that would not map to a path below the renamed level.
    fn new(request: &GenerationRequest) -> Result<Self> {
        validate_package(request.package())?;
        Ok(Self {
            mod_id: request.mod_id().to_string(),
            compact_name: request.compact_mod_name(),
            package_segments: request.package().split('.').map(str::to_string).collect(),
        })
    }

    /// Returns the new name, or `None` when the rules leave it unchanged.
    fn rename(&self, name: &str) -> Option<String> {
        let renamed = name
            .replace(markers::IDENTIFIER, &self.mod_id)
            .replace(markers::DISPLAY_NAME, &self.compact_name);
        (renamed != name).then_some(renamed)
    }

    fn package_path(&self, level: &Path) -> PathBuf {
        self.package_segments.iter().fold(level.to_path_buf(), |path, segment| path.join(segment))
    }
}

/// Applies the placeholder renaming rules to every entry under `root`.
///
/// # Arguments
/// * `root` - Materialized tree to rename in place
/// * `request` - Supplies the mod id, display name and package
///
/// # Errors
/// * `Error::InvalidPackage` if the package has an empty segment or a segment
///   containing a path separator; nothing is moved in that case
/// * `Error::StaleState` if a rename or relocation target already exists
pub fn rename_tree<P: AsRef<Path>>(root: P, request: &GenerationRequest) -> Result<()> {
    let rules = RenameRules::new(request)?;
    rename_level(root.as_ref(), &rules, true)
}

/// Copies `source` to `destination` and renames the copy.
pub fn materialize<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    request: &GenerationRequest,
) -> Result<()> {
    copy_tree(source, &destination)?;
    rename_tree(destination, request)
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}

fn rename_level(level: &Path, rules: &RenameRules, relocate: bool) -> Result<()> {
    for child in sorted_children(level)? {
        let Some(name) = child.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping rename of non UTF-8 name {}", child.display());
            continue;
        };
        if let Some(new_name) = rules.rename(name) {
            let target = level.join(&new_name);
            if target.exists() {
                return Err(Error::StaleState { path: target.display().to_string() });
            }
            debug!("Renaming {} to {}", child.display(), target.display());
            fs::rename(&child, &target)?;
        }
    }

    let relocated = if relocate { relocate_package(level, rules)? } else { None };

    for child in sorted_children(level)? {
        if !child.is_dir() {
            continue;
        }
        // The relocated subtree may itself spell `com/example`; never move it twice.
        let descend_relocating = match &relocated {
            Some(destination) => !destination.starts_with(&child),
            None => relocate,
        };
        rename_level(&child, rules, descend_relocating)?;
    }
    Ok(())
}

/// Moves `<level>/com/example` to the package path, returning the new location.
///
/// The subtree is parked in a staging sibling first, so destinations nested in or
/// next to the old location (`com.example.api`, `com.example2`) resolve cleanly.
/// `com` is removed only if nothing else lives in it.
fn relocate_package(level: &Path, rules: &RenameRules) -> Result<Option<PathBuf>> {
    let package_root = level.join(markers::PACKAGE_ROOT);
    let source = package_root.join(markers::PACKAGE_LEAF);
    if !source.is_dir() {
        return Ok(None);
    }

    let destination = rules.package_path(level);
    if destination == source {
        debug!("Package path {} is unchanged", source.display());
        return Ok(None);
    }

    let staging = level.join(PACKAGE_STAGING_DIR);
    if staging.exists() {
        return Err(Error::StaleState { path: staging.display().to_string() });
    }
    fs::rename(&source, &staging)?;

    if fs::read_dir(&package_root)?.next().is_none() {
        fs::remove_dir(&package_root)?;
    } else {
        debug!("Keeping {} since it has other entries", package_root.display());
    }

    if destination.exists() {
        return Err(Error::StaleState { path: destination.display().to_string() });
    }
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!("Moving package {} to {}", source.display(), destination.display());
    fs::rename(&staging, &destination)?;

    Ok(Some(destination))
}
