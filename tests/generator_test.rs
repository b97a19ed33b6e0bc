use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use modgen::error::Error;
use modgen::{generate, GenerationRequest, Generator, Language, Layout, MinecraftVersion, Platform};
use tempfile::TempDir;
use zip::ZipArchive;

fn fixture_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("templates")
}

fn layout(temp_dir: &TempDir) -> Layout {
    Layout {
        templates_dir: fixture_templates(),
        work_dir: temp_dir.path().join("output"),
        archive_path: temp_dir.path().join("output.zip"),
    }
}

fn request(mod_name: &str, mc_version: MinecraftVersion, platform: Platform) -> GenerationRequest {
    GenerationRequest::new(mod_name, mc_version, None, "com.example", platform, Language::Java)
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> String {
    let mut content = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
    content
}

#[test_log::test]
fn test_generate_default_project() {
    let temp_dir = TempDir::new().unwrap();
    let layout = layout(&temp_dir);
    let request = request("Cool Mod", MinecraftVersion::V1_20_1, Platform::Architectury);

    let archive_path = generate(&request, &layout).unwrap();

    assert_eq!(archive_path, layout.archive_path);
    assert!(!layout.work_dir.exists());

    let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.iter().all(|name| !name.contains("example_mod")), "{names:?}");
    assert!(names.iter().all(|name| !name.contains("ExampleMod")), "{names:?}");
    assert!(names.iter().all(|name| !name.starts_with("output")), "{names:?}");
    assert!(names.contains(&"common/src/main/resources/cool_mod.mixins.json".to_string()));

    let main_class = read_entry(&mut archive, "common/src/main/java/com/example/CoolMod.java");
    assert_eq!(main_class.lines().next(), Some("package com.example;"));
    assert!(main_class.contains("public final class CoolMod"));
    assert!(main_class.contains("MOD_ID = \"cool_mod\""));
    assert!(main_class.contains("NAME = \"Cool Mod\""));

    let mods_toml = read_entry(&mut archive, "forge/src/main/resources/META-INF/mods.toml");
    assert!(mods_toml.contains("loaderVersion = \"[47,)\""));
    assert!(mods_toml.contains("versionRange = \"[1.20.1,)\""));
    assert!(mods_toml.contains("[[dependencies.cool_mod]]"));
    assert!(!mods_toml.contains("{{"));

    let fabric_json = read_entry(&mut archive, "fabric/src/main/resources/fabric.mod.json");
    assert!(fabric_json.contains("\"fabric-api\": \">=0.92.2+1.20.1\""));
    assert!(fabric_json.contains("\"com.example.fabric.CoolModFabric\""));

    let properties = read_entry(&mut archive, "gradle.properties");
    assert!(properties.contains("\nmod_id=cool_mod\n"));
    assert!(properties.contains("\nminecraft_version=1.20.1\n"));
    assert!(properties.contains("\narchitectury_version=9.2.14\n"));
    assert!(properties.contains("\nforge_version=1.20.1-47.3.0\n"));
    assert!(properties.starts_with("# Done to increase the memory available to gradle.\n"));
}

#[test]
fn test_generate_latest_uses_neoforge_template() {
    let temp_dir = TempDir::new().unwrap();
    let layout = layout(&temp_dir);
    let request = GenerationRequest::new(
        "Cool Mod",
        MinecraftVersion::V1_21_1,
        Some("coolmod".to_string()),
        "dev.cool",
        Platform::Architectury,
        Language::Java,
    );

    Generator::new(&request, &layout).run().unwrap();

    let mut archive = ZipArchive::new(File::open(&layout.archive_path).unwrap()).unwrap();
    let main_class = read_entry(&mut archive, "common/src/main/java/dev/cool/CoolMod.java");
    assert!(main_class.starts_with("package dev.cool;"));

    let mods_toml =
        read_entry(&mut archive, "neoforge/src/main/resources/META-INF/neoforge.mods.toml");
    assert!(mods_toml.contains("loaderVersion = \"[4,)\""));
    assert!(mods_toml.contains("modId = \"coolmod\""));
    assert!(mods_toml.contains("versionRange = \"[1.1.0+1f1e2d3c4b,)\""));
}

#[test]
fn test_generate_purges_stale_output() {
    let temp_dir = TempDir::new().unwrap();
    let layout = layout(&temp_dir);
    fs::create_dir_all(layout.work_dir.join("leftover")).unwrap();
    fs::write(&layout.archive_path, "stale").unwrap();
    let request = request("Cool Mod", MinecraftVersion::V1_20_1, Platform::Architectury);

    generate(&request, &layout).unwrap();

    assert!(!layout.work_dir.exists());
    let archive = ZipArchive::new(File::open(&layout.archive_path).unwrap()).unwrap();
    assert!(archive.file_names().all(|name| !name.starts_with("leftover")));
}

#[test]
fn test_missing_template() {
    let temp_dir = TempDir::new().unwrap();
    let layout = layout(&temp_dir);
    let request = request("Cool Mod", MinecraftVersion::V1_20_1, Platform::Fabric);

    match generate(&request, &layout) {
        Err(Error::MissingTemplate { template_dir }) => {
            assert!(template_dir.ends_with("java/fabric"), "{template_dir}");
        }
        other => panic!("Expected MissingTemplate, got {other:?}"),
    }
    assert!(!layout.archive_path.exists());
}

#[test]
fn test_validation_runs_before_purge() {
    let temp_dir = TempDir::new().unwrap();
    let layout = layout(&temp_dir);
    fs::create_dir_all(&layout.work_dir).unwrap();
    let request = request("Cool Mod", MinecraftVersion::V1_21_1, Platform::Forge);

    let result = generate(&request, &layout);

    assert!(matches!(result, Err(Error::IncompatiblePlatformVersion { .. })));
    assert!(layout.work_dir.exists());
}

#[test]
fn test_invalid_mod_id_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let layout = layout(&temp_dir);
    let request = request("X", MinecraftVersion::V1_20_1, Platform::Architectury);

    assert!(matches!(generate(&request, &layout), Err(Error::InvalidIdentifier { .. })));
    assert!(!layout.archive_path.exists());
}

#[test]
fn test_archive_inside_work_dir_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut layout = layout(&temp_dir);
    layout.archive_path = layout.work_dir.join("out.zip");
    fs::create_dir_all(layout.work_dir.join("keep")).unwrap();
    let request = request("Cool Mod", MinecraftVersion::V1_20_1, Platform::Architectury);

    let result = generate(&request, &layout);

    assert!(matches!(result, Err(Error::ArchiveInsideWorkDir { .. })), "{result:?}");
    assert!(layout.work_dir.join("keep").exists());
    assert!(!layout.archive_path.exists());
}

#[test]
fn test_archive_inside_work_dir_after_dot_segments() {
    let temp_dir = TempDir::new().unwrap();
    let mut layout = layout(&temp_dir);
    layout.archive_path = temp_dir.path().join("dist/../output/./out.zip");

    assert!(matches!(layout.validate(), Err(Error::ArchiveInsideWorkDir { .. })));
}

#[test]
fn test_work_dir_equal_to_templates_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("templates");
    fs::create_dir_all(templates.join("java/fabric")).unwrap();
    let layout = Layout {
        templates_dir: templates.clone(),
        work_dir: templates.clone(),
        archive_path: temp_dir.path().join("output.zip"),
    };
    let request = request("Cool Mod", MinecraftVersion::V1_20_1, Platform::Fabric);

    let result = generate(&request, &layout);

    assert!(matches!(result, Err(Error::WorkDirOverlapsTemplates { .. })), "{result:?}");
    assert!(templates.join("java/fabric").is_dir());
}

#[test]
fn test_work_dir_containing_templates_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("work/templates");
    fs::create_dir_all(&templates).unwrap();
    let layout = Layout {
        templates_dir: templates.clone(),
        work_dir: temp_dir.path().join("work"),
        archive_path: temp_dir.path().join("output.zip"),
    };
    let request = request("Cool Mod", MinecraftVersion::V1_20_1, Platform::Fabric);

    assert!(matches!(generate(&request, &layout), Err(Error::WorkDirOverlapsTemplates { .. })));
    assert!(templates.is_dir());
}

#[test]
fn test_work_dir_inside_templates_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("templates");
    fs::create_dir_all(templates.join("output")).unwrap();
    let layout = Layout {
        templates_dir: templates.clone(),
        work_dir: templates.join("output"),
        archive_path: temp_dir.path().join("output.zip"),
    };
    let request = request("Cool Mod", MinecraftVersion::V1_20_1, Platform::Fabric);

    assert!(matches!(generate(&request, &layout), Err(Error::WorkDirOverlapsTemplates { .. })));
    assert!(templates.join("output").is_dir());
}

#[test]
fn test_current_dir_as_work_dir_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let layout = Layout {
        templates_dir: temp_dir.path().join("templates"),
        work_dir: PathBuf::from("."),
        archive_path: temp_dir.path().join("output.zip"),
    };

    assert!(matches!(layout.validate(), Err(Error::WorkDirContainsCurrentDir { .. })));

    let layout = Layout { work_dir: PathBuf::from(".."), ..layout };
    assert!(matches!(layout.validate(), Err(Error::WorkDirContainsCurrentDir { .. })));
}

#[test]
fn test_default_layout_is_valid() {
    assert!(Layout::default().validate().is_ok());
}
