//! Error handling for modgen.
//! Defines the error type and result alias used throughout the library.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure a generation run can hit.
///
/// None of these are recovered inside the library; they are propagated to the
/// caller, which decides whether to terminate (the binary) or carry on (an embedder).
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk directory tree: {0}.")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Failed to write archive: {0}.")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Invalid file pattern: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Invalid placeholder pattern: {0}.")]
    RegexError(#[from] regex::Error),

    /// The mod id is shorter than 2 or longer than 64 characters.
    #[error("Mod ID '{mod_id}' has length {length}, but it must be between 2 and 64.")]
    InvalidIdentifier { mod_id: String, length: usize },

    /// The platform cannot target the requested Minecraft version.
    #[error("Platform '{platform}' cannot target Minecraft {version}: {reason}.")]
    IncompatiblePlatformVersion { platform: String, version: String, reason: String },

    /// The package cannot be mapped onto a directory path inside the project.
    #[error("Package '{package}' is invalid: {reason}.")]
    InvalidPackage { package: String, reason: String },

    /// The archive would be written inside the directory that is deleted after archiving.
    #[error("Archive '{archive_path}' must not be inside the work directory '{work_dir}'.")]
    ArchiveInsideWorkDir { archive_path: String, work_dir: String },

    /// The work directory is the templates directory, or one lies inside the other.
    #[error("Work directory '{work_dir}' overlaps the templates directory '{templates_dir}'.")]
    WorkDirOverlapsTemplates { work_dir: String, templates_dir: String },

    /// The work directory is the current directory or one of its ancestors.
    #[error("Work directory '{work_dir}' contains the current directory '{current_dir}'.")]
    WorkDirContainsCurrentDir { work_dir: String, current_dir: String },

    /// No template exists for the requested combination.
    #[error("No templates exist at '{template_dir}'.")]
    MissingTemplate { template_dir: String },

    /// A destination path exists when it is expected to be absent.
    #[error("Path '{path}' already exists. Remove it before generating.")]
    StaleState { path: String },

    /// A properties file inside a template does not follow the key/value format.
    #[error("Failed to parse '{}' at line {line}: {reason}.", .path.display())]
    UnparsableConfigFile { path: PathBuf, line: usize, reason: String },

    /// A template file that should be text is not valid UTF-8.
    #[error("File '{}' is not valid UTF-8 text.", .path.display())]
    UndecodableFile { path: PathBuf },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
