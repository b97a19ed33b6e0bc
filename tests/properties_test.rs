use std::fs;

use modgen::error::Error;
use modgen::properties::{rewrite_properties, rewrite_properties_file, Properties};
use modgen::{GenerationRequest, Language, MinecraftVersion, Platform};
use tempfile::TempDir;

fn request() -> GenerationRequest {
    GenerationRequest::new(
        "Cool Mod",
        MinecraftVersion::V1_21_1,
        None,
        "net.cool",
        Platform::NeoForge,
        Language::Java,
    )
}

#[test]
fn test_parse_and_lookup() {
    let properties = Properties::parse("# comment\na=1\nb : 2\nc 3\n\n! other\n").unwrap();

    assert_eq!(properties.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(properties.get("a"), Some("1"));
    assert_eq!(properties.get("b"), Some("2"));
    assert_eq!(properties.get("c"), Some("3"));
    assert_eq!(properties.get("d"), None);
}

#[test]
fn test_unmodified_file_round_trips() {
    let content = "# header\r\nkey = value \\\n    continued\n\n  spaced:thing\nlast=no newline";
    let properties = Properties::parse(content).unwrap();
    assert_eq!(properties.to_string(), content);
}

#[test]
fn test_rewrites_recognized_keys_only() {
    let content = "\
# Mod properties
mod_version=1.0.0
maven_group=com.example
mod_id = example_mod

minecraft_version=1.20.1
vs2_version=0.0.0
fabric_api_version: 0.0.0
forge_version=47.3.0
";
    let (output, rewritten) = rewrite_properties(content, &request()).unwrap();

    assert_eq!(rewritten, 5);
    assert_eq!(
        output,
        "\
# Mod properties
mod_version=1.0.0
maven_group=net.cool
mod_id = cool_mod

minecraft_version=1.21.1
vs2_version=2.4.0
fabric_api_version: 0.116.0+1.21.1
forge_version=47.3.0
"
    );
}

#[test]
fn test_absent_keys_are_not_created() {
    let (output, rewritten) = rewrite_properties("org.gradle.jvmargs=-Xmx2G\n", &request()).unwrap();

    assert_eq!(rewritten, 0);
    assert_eq!(output, "org.gradle.jvmargs=-Xmx2G\n");
}

#[test]
fn test_rewrites_continued_value() {
    let content = "vs_core_version=1.0.0\\\n  +abc\nother=x\n";
    let (output, _) = rewrite_properties(content, &request()).unwrap();

    assert_eq!(output, "vs_core_version=1.1.0+1f1e2d3c4b\nother=x\n");
}

#[test]
fn test_key_only_entry_gets_separator() {
    let (output, rewritten) = rewrite_properties("mod_id\n", &request()).unwrap();

    assert_eq!(rewritten, 1);
    assert_eq!(output, "mod_id=cool_mod\n");
}

#[test]
fn test_malformed_content_is_rejected() {
    let err = Properties::parse("a=1\n=orphan\n").unwrap_err();
    assert_eq!(err.line, 2);

    let err = Properties::parse("a=1\nb=2\\").unwrap_err();
    assert_eq!(err.line, 2);
}

#[test]
fn test_rewrite_file_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gradle.properties");
    fs::write(&path, "maven_group=com.example\narchitectury_version=0.0.0\n").unwrap();

    assert_eq!(rewrite_properties_file(&path, &request()).unwrap(), 2);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "maven_group=net.cool\narchitectury_version=13.0.8\n"
    );
}

#[test]
fn test_rewrite_file_reports_path_on_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.properties");
    fs::write(&path, "ok=1\n: nothing\n").unwrap();

    match rewrite_properties_file(&path, &request()) {
        Err(Error::UnparsableConfigFile { path: reported, line, .. }) => {
            assert_eq!(reported, path);
            assert_eq!(line, 2);
        }
        other => panic!("Expected UnparsableConfigFile, got {other:?}"),
    }
}

#[test]
fn test_rewrite_file_rejects_binary() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("binary.properties");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    assert!(matches!(
        rewrite_properties_file(&path, &request()),
        Err(Error::UndecodableFile { .. })
    ));
}
