//! Placeholder substitution for template contents.
//! Markers are plain literals; nothing in a template is evaluated.
use crate::constants::{markers, tokens};
use crate::error::Result;
use crate::request::GenerationRequest;
use crate::versions::{Dependency, LoaderShortVersion};
use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template text.
    ///
    /// # Arguments
    /// * `template` - Text containing placeholder markers
    ///
    /// # Returns
    /// * `String` - The text with every recognized marker replaced
    fn render(&self, template: &str) -> String;
}

/// Replaces literal markers with their values in a single left-to-right pass.
///
/// At any position the first marker in insertion order that matches wins, and the
/// inserted value is never scanned again. A value that happens to contain another
/// marker therefore comes out verbatim.
#[derive(Debug)]
pub struct PlaceholderRenderer {
    pattern: Option<Regex>,
    replacements: IndexMap<String, String>,
}

impl PlaceholderRenderer {
    /// Creates a renderer from an ordered marker → value map.
    ///
    /// # Arguments
    /// * `replacements` - Markers in priority order, each mapped to its value.
    ///   Empty markers are ignored.
    ///
    /// # Returns
    /// * `Result<Self>` - Renderer matching all markers in one pass
    ///
    /// # Errors
    /// * `Error::RegexError` if the combined marker pattern cannot be compiled
    pub fn new(replacements: IndexMap<String, String>) -> Result<Self> {
        let alternatives: Vec<String> = replacements
            .keys()
            .filter(|marker| !marker.is_empty())
            .map(|marker| regex::escape(marker))
            .collect();

        let pattern =
            if alternatives.is_empty() { None } else { Some(Regex::new(&alternatives.join("|"))?) };

        Ok(Self { pattern, replacements })
    }

    /// Creates the renderer used for generated project files.
    ///
    /// # Arguments
    /// * `request` - Source of the values; see [`placeholders`] for the marker table
    ///
    /// # Errors
    /// * `Error::RegexError` if the marker pattern cannot be compiled
    pub fn for_request(request: &GenerationRequest) -> Result<Self> {
        Self::new(placeholders(request))
    }

    pub fn replacements(&self) -> &IndexMap<String, String> {
        &self.replacements
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return template.to_string();
        };

        pattern
            .replace_all(template, |caps: &Captures| {
                self.replacements.get(&caps[0]).cloned().unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Builds the ordered marker table for a request.
///
/// Order: namespace, display name, identifier, then the `{{ Label }}` tokens. Only one
/// of the Forge/NeoForge short-version tokens is present, depending on the version.
pub fn placeholders(request: &GenerationRequest) -> IndexMap<String, String> {
    let mc_version = request.mc_version();
    let mut map = IndexMap::new();

    map.insert(markers::NAMESPACE.to_string(), request.package().to_string());
    map.insert(markers::DISPLAY_NAME.to_string(), request.compact_mod_name());
    map.insert(markers::IDENTIFIER.to_string(), request.mod_id().to_string());

    map.insert(tokens::MOD_ID.to_string(), request.mod_id().to_string());
    map.insert(tokens::MOD_NAME.to_string(), request.mod_name().to_string());
    map.insert(tokens::MINECRAFT_VERSION.to_string(), mc_version.as_str().to_string());

    for (token, dependency) in [
        (tokens::VS2_VERSION, Dependency::ValkyrienSkies),
        (tokens::VS_CORE_VERSION, Dependency::VsCore),
        (tokens::ARCHITECTURY_VERSION, Dependency::ArchitecturyApi),
        (tokens::FABRIC_API_VERSION, Dependency::FabricApi),
    ] {
        map.insert(token.to_string(), dependency.version(mc_version).to_string());
    }

    match LoaderShortVersion::for_version(mc_version) {
        LoaderShortVersion::NeoForge(short) => {
            map.insert(tokens::NEOFORGE_SHORT_VERSION.to_string(), short.to_string())
        }
        LoaderShortVersion::Forge(short) => {
            map.insert(tokens::FORGE_SHORT_VERSION.to_string(), short.to_string())
        }
    };

    map
}
