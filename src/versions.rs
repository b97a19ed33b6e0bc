//! Dependency versions pinned for each supported Minecraft version.
//!
//! Every lookup is an exhaustive `match`, so adding a [`MinecraftVersion`] fails to
//! compile until all families have an entry.

use crate::request::MinecraftVersion;

/// Dependency families whose versions are written into generated projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    ValkyrienSkies,
    VsCore,
    ArchitecturyApi,
    FabricApi,
}

impl Dependency {
    pub const ALL: [Dependency; 4] = [
        Dependency::ValkyrienSkies,
        Dependency::VsCore,
        Dependency::ArchitecturyApi,
        Dependency::FabricApi,
    ];

    pub fn version(&self, mc_version: MinecraftVersion) -> &'static str {
        use MinecraftVersion::*;
        match (self, mc_version) {
            (Dependency::ValkyrienSkies, V1_21_1) => "2.4.0",
            (Dependency::ValkyrienSkies, V1_20_1) => "2.3.0-beta.5",
            (Dependency::ValkyrienSkies, V1_18_2) => "2.1.2-beta.1",

            (Dependency::VsCore, V1_21_1) => "1.1.0+1f1e2d3c4b",
            (Dependency::VsCore, V1_20_1) => "1.1.0+2a62e2a5a4",
            (Dependency::VsCore, V1_18_2) => "1.0.0+b6d9ad1f2c",

            (Dependency::ArchitecturyApi, V1_21_1) => "13.0.8",
            (Dependency::ArchitecturyApi, V1_20_1) => "9.2.14",
            (Dependency::ArchitecturyApi, V1_18_2) => "4.12.94",

            (Dependency::FabricApi, V1_21_1) => "0.116.0+1.21.1",
            (Dependency::FabricApi, V1_20_1) => "0.92.2+1.20.1",
            (Dependency::FabricApi, V1_18_2) => "0.77.0+1.18.2",
        }
    }
}

/// Major loader version used in `mods.toml` version ranges.
///
/// The newest Minecraft version is built on NeoForge while older ones use Forge, so
/// exactly one of the two variants applies to any given version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderShortVersion {
    Forge(&'static str),
    NeoForge(&'static str),
}

impl LoaderShortVersion {
    pub fn for_version(mc_version: MinecraftVersion) -> Self {
        match mc_version {
            MinecraftVersion::V1_21_1 => LoaderShortVersion::NeoForge("4"),
            MinecraftVersion::V1_20_1 => LoaderShortVersion::Forge("47"),
            MinecraftVersion::V1_18_2 => LoaderShortVersion::Forge("40"),
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            LoaderShortVersion::Forge(v) | LoaderShortVersion::NeoForge(v) => v,
        }
    }
}
