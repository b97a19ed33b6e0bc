//! modgen scaffolds Minecraft addon projects.
//! It copies a template, renames and rewrites its placeholders for the requested
//! mod, and packs the result into a zip archive.

/// Packing the generated tree into the output archive
pub mod archive;

/// Command-line interface module for the modgen binary
pub mod cli;

/// Common constants: placeholder markers, tokens and defaults
pub mod constants;

/// Error types and handling
pub mod error;

/// Orchestration of a full generation run
pub mod generator;

/// Template directory lookup
pub mod loader;

/// Logger initialization
pub mod logger;

/// Template copying and placeholder path renaming
pub mod materializer;

/// In-place rewriting of generated file contents
pub mod processor;

/// Rewriting of `*.properties` files
pub mod properties;

/// Literal placeholder substitution
pub mod renderer;

/// The generation request and its validation
pub mod request;

/// Dependency versions per Minecraft version
pub mod versions;

pub use generator::{generate, Generator, Layout};
pub use request::{GenerationRequest, Language, MinecraftVersion, Platform};
