//! Content rewriting of a materialized project tree.
//!
//! Every file is classified by name: properties files go through the structured
//! rewriter, pre-built archives are left alone, and everything else is treated as
//! UTF-8 text and rendered through a [`TemplateRenderer`].

use std::fs;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use walkdir::WalkDir;

use crate::{
    constants::{BINARY_FILE_PATTERNS, CONFIG_FILE_PATTERNS},
    error::{Error, Result},
    properties::rewrite_properties_file,
    renderer::{PlaceholderRenderer, TemplateRenderer},
    request::GenerationRequest,
};

/// How a file's contents are treated by the rewrite pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Structured `key=value` file, rewritten key by key.
    Config,
    /// Pre-built archive, copied through untouched.
    Binary,
    /// Anything else; rendered as text.
    Text,
}

/// Classifies files by name using glob patterns.
#[derive(Debug)]
pub struct FileClassifier {
    config: GlobSet,
    binary: GlobSet,
}

fn build_glob_set(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

impl FileClassifier {
    /// Creates a classifier for `*.properties` configs and `*.jar`/`*.zip` archives.
    ///
    /// # Errors
    /// * `Error::GlobError` if a built-in pattern fails to compile
    pub fn new() -> Result<Self> {
        Self::with_patterns(&CONFIG_FILE_PATTERNS, &BINARY_FILE_PATTERNS)
    }

    /// Creates a classifier from custom glob patterns.
    ///
    /// # Arguments
    /// * `config` - File name patterns handed to the properties rewriter
    /// * `binary` - File name patterns left untouched; they take precedence
    ///
    /// # Errors
    /// * `Error::GlobError` if a pattern is invalid
    pub fn with_patterns(config: &[&str], binary: &[&str]) -> Result<Self> {
        Ok(Self { config: build_glob_set(config)?, binary: build_glob_set(binary)? })
    }

    /// Classifies a file by its name.
    ///
    /// # Arguments
    /// * `path` - File path; only the final component is matched
    ///
    /// # Returns
    /// * `FileKind` - `Text` when no pattern matches
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> FileKind {
        let Some(name) = path.as_ref().file_name() else {
            return FileKind::Text;
        };
        if self.binary.is_match(name) {
            FileKind::Binary
        } else if self.config.is_match(name) {
            FileKind::Config
        } else {
            FileKind::Text
        }
    }
}

/// Counts of files handled by a rewrite pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteSummary {
    pub rendered: usize,
    pub configs: usize,
    pub skipped: usize,
}

/// Rewrites file contents in place.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    request: &'a GenerationRequest,
    classifier: FileClassifier,
}

impl<'a> Processor<'a> {
    /// Creates a processor with the default file classification.
    ///
    /// # Arguments
    /// * `renderer` - Engine applied to text files
    /// * `request` - Source of the values written into config files
    ///
    /// # Errors
    /// * `Error::GlobError` if the classifier patterns fail to compile
    pub fn new(renderer: &'a dyn TemplateRenderer, request: &'a GenerationRequest) -> Result<Self> {
        Ok(Self { renderer, request, classifier: FileClassifier::new()? })
    }

    /// Rewrites a single file and reports how it was treated.
    ///
    /// # Errors
    /// * `Error::UndecodableFile` if a text or config file is not UTF-8
    /// * `Error::UnparsableConfigFile` if a config file is malformed
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<FileKind> {
        let path = path.as_ref();
        let kind = self.classifier.classify(path);
        match kind {
            FileKind::Binary => {
                debug!("Skipping binary file {}", path.display());
            }
            FileKind::Config => {
                debug!("Rewriting config file {}", path.display());
                rewrite_properties_file(path, self.request)?;
            }
            FileKind::Text => {
                debug!("Rendering {}", path.display());
                let bytes = fs::read(path)?;
                let content = String::from_utf8(bytes)
                    .map_err(|_| Error::UndecodableFile { path: path.to_path_buf() })?;
                fs::write(path, self.renderer.render(&content))?;
            }
        }
        Ok(kind)
    }

    /// Rewrites every file under `root`, stopping at the first failure.
    ///
    /// # Arguments
    /// * `root` - Materialized project tree
    ///
    /// # Returns
    /// * `Result<RewriteSummary>` - How many files were rendered, rewritten or skipped
    ///
    /// # Errors
    /// * Any error from [`Processor::process_file`], or `Error::WalkdirError`
    pub fn process_tree<P: AsRef<Path>>(&self, root: P) -> Result<RewriteSummary> {
        let mut summary = RewriteSummary::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            match self.process_file(entry.path())? {
                FileKind::Text => summary.rendered += 1,
                FileKind::Config => summary.configs += 1,
                FileKind::Binary => summary.skipped += 1,
            }
        }
        Ok(summary)
    }
}

/// Rewrites a materialized tree with the placeholders of `request`.
pub fn rewrite_tree<P: AsRef<Path>>(root: P, request: &GenerationRequest) -> Result<RewriteSummary> {
    let renderer = PlaceholderRenderer::for_request(request)?;
    Processor::new(&renderer, request)?.process_tree(root)
}
