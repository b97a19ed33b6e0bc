//! Common constants used throughout modgen.

/// Directory searched for templates when none is given.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Scratch directory the template is materialized into.
pub const DEFAULT_WORK_DIR: &str = "output";

/// Archive written at the end of a run.
pub const DEFAULT_ARCHIVE: &str = "output.zip";

pub const DEFAULT_MOD_NAME: &str = "Example Mod";
pub const DEFAULT_PACKAGE: &str = "com.example";

/// Mod id length bounds, inclusive.
pub const MOD_ID_MIN_LEN: usize = 2;
pub const MOD_ID_MAX_LEN: usize = 64;

/// Placeholder markers found in template names and contents.
pub mod markers {
    pub const NAMESPACE: &str = "com.example";
    pub const DISPLAY_NAME: &str = "ExampleMod";
    pub const IDENTIFIER: &str = "example_mod";

    /// Package-path placeholder: `com/example`.
    pub const PACKAGE_ROOT: &str = "com";
    pub const PACKAGE_LEAF: &str = "example";
}

/// `{{ Label }}` tokens substituted in file contents.
pub mod tokens {
    pub const MOD_ID: &str = "{{ Mod ID }}";
    pub const MOD_NAME: &str = "{{ Mod Name }}";
    pub const MINECRAFT_VERSION: &str = "{{ Minecraft Version }}";
    pub const VS2_VERSION: &str = "{{ VS2 Version }}";
    pub const VS_CORE_VERSION: &str = "{{ VS Core Version }}";
    pub const ARCHITECTURY_VERSION: &str = "{{ Architectury Version }}";
    pub const FABRIC_API_VERSION: &str = "{{ Fabric API Version }}";
    pub const FORGE_SHORT_VERSION: &str = "{{ Forge Short Version }}";
    pub const NEOFORGE_SHORT_VERSION: &str = "{{ NeoForge Short Version }}";
}

/// Keys rewritten inside `*.properties` files.
pub mod property_keys {
    pub const MAVEN_GROUP: &str = "maven_group";
    pub const MOD_ID: &str = "mod_id";
    pub const MINECRAFT_VERSION: &str = "minecraft_version";
    pub const VS2_VERSION: &str = "vs2_version";
    pub const VS_CORE_VERSION: &str = "vs_core_version";
    pub const ARCHITECTURY_VERSION: &str = "architectury_version";
    pub const FABRIC_API_VERSION: &str = "fabric_api_version";
}

/// Files handed to the properties rewriter.
pub const CONFIG_FILE_PATTERNS: [&str; 1] = ["*.properties"];

/// Pre-built archives that must be left byte-for-byte intact.
pub const BINARY_FILE_PATTERNS: [&str; 2] = ["*.jar", "*.zip"];
