//! Template lookup for modgen.
//! Maps a request onto the `templates/<language>/<platform>[/<loader>]` layout.
use crate::error::{Error, Result};
use crate::request::{GenerationRequest, Language, MinecraftVersion, Platform};
use log::debug;
use std::path::{Path, PathBuf};

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Loads the template.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to the template directory
    fn load(&self) -> Result<PathBuf>;
}

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    ///
    /// # Arguments
    /// * `path` - Template directory; checked only when [`TemplateLoader::load`] runs
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// Loads a template from the local filesystem.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to the template directory
    ///
    /// # Errors
    /// * `Error::MissingTemplate` if the path is not an existing directory
    fn load(&self) -> Result<PathBuf> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::MissingTemplate { template_dir: path.display().to_string() });
        }

        Ok(path.to_path_buf())
    }
}

/// Computes the template directory for a combination.
///
/// Architectury templates are split by the loader backing them: NeoForge for the
/// newest Minecraft version, Forge for the rest.
pub fn template_path<P: AsRef<Path>>(
    templates_dir: P,
    language: Language,
    platform: Platform,
    mc_version: MinecraftVersion,
) -> PathBuf {
    let mut path = templates_dir.as_ref().join(language.as_str()).join(platform.as_str());
    if platform == Platform::Architectury {
        path.push(if mc_version.is_latest() { "neoforge" } else { "forge" });
    }
    path
}

/// Returns the template directory for a request.
///
/// # Arguments
/// * `templates_dir` - Root of the template layout
/// * `request` - Selects language, platform and Minecraft version
///
/// # Errors
/// * `Error::MissingTemplate` if the computed directory does not exist
pub fn load_template<P: AsRef<Path>>(templates_dir: P, request: &GenerationRequest) -> Result<PathBuf> {
    let path = template_path(
        templates_dir,
        request.language(),
        request.platform(),
        request.mc_version(),
    );
    debug!("Checking for template at '{}'", path.display());

    LocalLoader::new(path).load()
}
