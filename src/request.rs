//! The parameters of a single generation run.
//!
//! A [`GenerationRequest`] is built once from the command line (or by an embedding
//! caller) and is then only ever borrowed. Validation lives here too, since both
//! checks are pure functions of the request.

use clap::ValueEnum;
use log::debug;

use crate::constants::{DEFAULT_MOD_NAME, DEFAULT_PACKAGE, MOD_ID_MAX_LEN, MOD_ID_MIN_LEN};
use crate::error::{Error, Result};

/// Minecraft versions a template exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum MinecraftVersion {
    #[value(name = "1.21.1")]
    V1_21_1,
    #[value(name = "1.20.1")]
    V1_20_1,
    #[value(name = "1.18.2")]
    V1_18_2,
}

impl MinecraftVersion {
    /// The newest supported version. Several dependency ecosystems changed at this
    /// boundary, so a few lookups branch on it.
    pub const LATEST: MinecraftVersion = MinecraftVersion::V1_21_1;

    pub const ALL: [MinecraftVersion; 3] =
        [MinecraftVersion::V1_21_1, MinecraftVersion::V1_20_1, MinecraftVersion::V1_18_2];

    pub fn as_str(&self) -> &'static str {
        match self {
            MinecraftVersion::V1_21_1 => "1.21.1",
            MinecraftVersion::V1_20_1 => "1.20.1",
            MinecraftVersion::V1_18_2 => "1.18.2",
        }
    }

    pub fn is_latest(&self) -> bool {
        *self == Self::LATEST
    }
}

impl std::fmt::Display for MinecraftVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mod loader the generated project is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Platform {
    Forge,
    Fabric,
    #[value(name = "neoforge")]
    NeoForge,
    Architectury,
}

impl Platform {
    pub const ALL: [Platform; 4] =
        [Platform::Forge, Platform::Fabric, Platform::NeoForge, Platform::Architectury];

    /// Directory name used in the template layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Forge => "forge",
            Platform::Fabric => "fabric",
            Platform::NeoForge => "neoforge",
            Platform::Architectury => "architectury",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Language {
    Java,
    Kotlin,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Kotlin => "kotlin",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of the project to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    mod_name: String,
    mc_version: MinecraftVersion,
    mod_id: String,
    package: String,
    platform: Platform,
    language: Language,
}

impl GenerationRequest {
    /// Creates a request. A missing or empty `mod_id` is derived from `mod_name`.
    pub fn new<S: Into<String>, P: Into<String>>(
        mod_name: S,
        mc_version: MinecraftVersion,
        mod_id: Option<String>,
        package: P,
        platform: Platform,
        language: Language,
    ) -> Self {
        let mod_name = mod_name.into();
        let mod_id = match mod_id {
            Some(id) if !id.is_empty() => id,
            _ => default_mod_id(&mod_name),
        };
        Self { mod_name, mc_version, mod_id, package: package.into(), platform, language }
    }

    pub fn mod_name(&self) -> &str {
        &self.mod_name
    }

    /// The display name with all whitespace removed, as used in class names.
    pub fn compact_mod_name(&self) -> String {
        self.mod_name.chars().filter(|c| !c.is_whitespace()).collect()
    }

    pub fn mc_version(&self) -> MinecraftVersion {
        self.mc_version
    }

    pub fn mod_id(&self) -> &str {
        &self.mod_id
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Runs every check that must pass before the filesystem is touched.
    pub fn validate(&self) -> Result<()> {
        validate_mod_id(&self.mod_id)?;
        validate_package(&self.package)?;
        check_compatibility(self.platform, self.mc_version)
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest::new(
            DEFAULT_MOD_NAME,
            MinecraftVersion::V1_20_1,
            None,
            DEFAULT_PACKAGE,
            Platform::Architectury,
            Language::Java,
        )
    }
}

/// Lower-cases the display name and joins its words with underscores.
pub fn default_mod_id(mod_name: &str) -> String {
    mod_name.to_lowercase().replace(' ', "_")
}

/// Checks the mod id length against the inclusive [2, 64] bounds.
pub fn validate_mod_id(mod_id: &str) -> Result<()> {
    debug!("Validating mod id '{mod_id}'");
    let length = mod_id.chars().count();
    if !(MOD_ID_MIN_LEN..=MOD_ID_MAX_LEN).contains(&length) {
        return Err(Error::InvalidIdentifier { mod_id: mod_id.to_string(), length });
    }
    Ok(())
}

/// Checks that every dot-separated segment of the package is a plain directory name.
///
/// # Arguments
/// * `package` - Dotted package string such as `com.example`
///
/// # Errors
/// * `Error::InvalidPackage` if a segment is empty, or contains a path separator,
///   a drive separator (`:`) or a NUL byte. This covers `""`, `"."`, `".."`,
///   absolute paths and `a/b` style segments.
pub fn validate_package(package: &str) -> Result<()> {
    debug!("Validating package '{package}'");
    let invalid = |reason: String| Error::InvalidPackage { package: package.to_string(), reason };

    for segment in package.split('.') {
        if segment.is_empty() {
            return Err(invalid("it contains an empty segment".to_string()));
        }
        if let Some(c) = segment.chars().find(|c| matches!(*c, '/' | '\\' | ':' | '\0')) {
            return Err(invalid(format!("segment '{segment}' contains {c:?}")));
        }
    }
    Ok(())
}

/// Refuses platform/version pairs that no template supports.
pub fn check_compatibility(platform: Platform, version: MinecraftVersion) -> Result<()> {
    debug!("Validating platform '{platform}' with Minecraft {version}");
    let reason = match (platform, version) {
        (Platform::NeoForge, v) if v != MinecraftVersion::V1_21_1 => {
            Some("the current NeoForge template only supports 1.21.1")
        }
        (Platform::Forge, MinecraftVersion::V1_21_1) => {
            Some("Forge support is dropped past 1.20.1")
        }
        _ => None,
    };

    match reason {
        Some(reason) => Err(Error::IncompatiblePlatformVersion {
            platform: platform.to_string(),
            version: version.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
