//! Orchestration of a generation run.
//!
//! The pipeline is strictly linear: validate, purge stale output, locate the
//! template, materialize and rename, rewrite contents, then archive and clean up.
//! The first failing step ends the run and its error is returned to the caller.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use crate::{
    archive::package,
    constants::{DEFAULT_ARCHIVE, DEFAULT_TEMPLATES_DIR, DEFAULT_WORK_DIR},
    error::{Error, Result},
    loader::load_template,
    materializer::materialize,
    processor::rewrite_tree,
    request::GenerationRequest,
};

/// Filesystem locations used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Root of the `<language>/<platform>[/<loader>]` template tree.
    pub templates_dir: PathBuf,
    /// Scratch directory; deleted once the archive is written.
    pub work_dir: PathBuf,
    pub archive_path: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            archive_path: PathBuf::from(DEFAULT_ARCHIVE),
        }
    }
}

impl Layout {
    /// Checks that purging and archiving cannot destroy anything but the run's own output.
    ///
    /// Paths are resolved against the current directory and `.`/`..` are folded
    /// lexically, so the checks hold for paths that do not exist yet.
    ///
    /// # Returns
    /// * `Result<()>` - Ok when the three locations are independent
    ///
    /// # Errors
    /// * `Error::ArchiveInsideWorkDir` if `archive_path` lies inside `work_dir`
    /// * `Error::WorkDirOverlapsTemplates` if `work_dir` equals, contains or is
    ///   contained by `templates_dir`
    /// * `Error::WorkDirContainsCurrentDir` if `work_dir` is the current directory
    ///   or one of its ancestors
    pub fn validate(&self) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        let templates_dir = resolve(&current_dir, &self.templates_dir);
        let work_dir = resolve(&current_dir, &self.work_dir);
        let archive_path = resolve(&current_dir, &self.archive_path);

        if archive_path.starts_with(&work_dir) {
            return Err(Error::ArchiveInsideWorkDir {
                archive_path: self.archive_path.display().to_string(),
                work_dir: self.work_dir.display().to_string(),
            });
        }
        if work_dir.starts_with(&templates_dir) || templates_dir.starts_with(&work_dir) {
            return Err(Error::WorkDirOverlapsTemplates {
                work_dir: self.work_dir.display().to_string(),
                templates_dir: self.templates_dir.display().to_string(),
            });
        }
        if current_dir.starts_with(&work_dir) {
            return Err(Error::WorkDirContainsCurrentDir {
                work_dir: self.work_dir.display().to_string(),
                current_dir: current_dir.display().to_string(),
            });
        }
        Ok(())
    }
}

/// Joins `path` onto `base` and folds `.` and `..` without touching the filesystem.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}

/// Runs the generation pipeline for one request.
pub struct Generator<'a> {
    request: &'a GenerationRequest,
    layout: &'a Layout,
}

impl<'a> Generator<'a> {
    /// Creates a generator borrowing the request and layout for the length of the run.
    pub fn new(request: &'a GenerationRequest, layout: &'a Layout) -> Self {
        Self { request, layout }
    }

    /// Executes every step and returns the path of the written archive.
    ///
    /// Nothing on disk is touched until both the request and the layout validate.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the archive, the only file left behind
    ///
    /// # Errors
    /// * Validation errors from [`GenerationRequest::validate`] and [`Layout::validate`]
    /// * `Error::MissingTemplate` if no template exists for the request
    /// * Any I/O, parse or decode error raised while materializing, rewriting or archiving
    pub fn run(&self) -> Result<PathBuf> {
        info!("Validating request");
        self.request.validate()?;
        self.layout.validate()?;

        self.print_banner();

        info!("Deleting stale output");
        self.purge()?;

        info!("Locating template");
        let template_dir = load_template(&self.layout.templates_dir, self.request)?;
        println!("Using template from '{}'", template_dir.display());

        info!("Materializing template into {}", self.layout.work_dir.display());
        materialize(&template_dir, &self.layout.work_dir, self.request)?;

        info!("Rewriting file contents");
        let summary = rewrite_tree(&self.layout.work_dir, self.request)?;
        debug!(
            "Rendered {} file(s), rewrote {} config file(s), skipped {} binary file(s)",
            summary.rendered, summary.configs, summary.skipped
        );

        info!("Writing archive {}", self.layout.archive_path.display());
        let entries = package(&self.layout.work_dir, &self.layout.archive_path)?;
        debug!("Archived {entries} file(s)");

        Ok(self.layout.archive_path.clone())
    }

    /// Removes the work directory and archive left behind by a previous run.
    pub fn purge(&self) -> Result<()> {
        remove_path(&self.layout.work_dir)?;
        remove_path(&self.layout.archive_path)
    }

    fn print_banner(&self) {
        let request = self.request;
        println!("============== Starting Generator ==============");
        println!("Mod Name: {}", request.mod_name());
        println!("Mod ID: {}", request.mod_id());
        println!("Package: {}", request.package());
        println!("Minecraft Version: {}", request.mc_version());
        println!("Platform: {}", request.platform());
        println!("Language: {}", request.language());
        println!("================================================");
    }
}

fn remove_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        debug!("Removing directory {}", path.display());
        fs::remove_dir_all(path)?;
    } else if path.exists() {
        debug!("Removing file {}", path.display());
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Convenience wrapper around [`Generator::run`].
pub fn generate(request: &GenerationRequest, layout: &Layout) -> Result<PathBuf> {
    Generator::new(request, layout).run()
}
