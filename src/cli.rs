//! Command-line interface implementation for modgen.
//! Provides argument parsing and help text formatting using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ARCHIVE, DEFAULT_MOD_NAME, DEFAULT_PACKAGE, DEFAULT_TEMPLATES_DIR, DEFAULT_WORK_DIR,
};
use crate::generator::Layout;
use crate::request::{GenerationRequest, Language, MinecraftVersion, Platform};

/// Command-line arguments structure for modgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "modgen: Minecraft addon template generator", long_about = None)]
pub struct Args {
    /// The human-readable name of your addon
    #[arg(long, default_value = DEFAULT_MOD_NAME)]
    pub mod_name: String,

    /// The Minecraft version of your addon
    #[arg(long, value_enum, default_value_t = MinecraftVersion::V1_20_1)]
    pub mc_version: MinecraftVersion,

    /// The mod id of your addon. Derived from the mod name when omitted
    #[arg(long)]
    pub mod_id: Option<String>,

    /// The unique package name for your addon
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// The platform on which you will test and release the addon
    #[arg(long, value_enum, default_value_t = Platform::Architectury)]
    pub platform: Platform,

    /// The language being used to write the addon
    #[arg(long, value_enum, default_value_t = Language::Java)]
    pub language: Language,

    /// Directory containing the templates
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    /// Scratch directory the project is assembled in. Deleted after archiving
    #[arg(long, value_name = "DIR", default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// Path of the generated archive
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_ARCHIVE)]
    pub output: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the immutable request described by the arguments.
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(
            self.mod_name.clone(),
            self.mc_version,
            self.mod_id.clone(),
            self.package.clone(),
            self.platform,
            self.language,
        )
    }

    pub fn layout(&self) -> Layout {
        Layout {
            templates_dir: self.templates_dir.clone(),
            work_dir: self.work_dir.clone(),
            archive_path: self.output.clone(),
        }
    }
}

/// Parses command line arguments, exiting with clap's usage error on failure.
pub fn get_args() -> Args {
    Args::parse()
}
