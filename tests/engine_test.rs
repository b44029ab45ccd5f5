//! End-to-end properties of the block engine against real files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use cmakesync::engine::{
    AddOutcome, EngineOptions, RemoveOutcome, add_entry, add_include_dir, create_blocks,
    remove_entry,
};
use cmakesync::mapping::ExtensionMap;

fn cpp_mapping() -> ExtensionMap {
    let mut map = ExtensionMap::new();
    map.insert(".cpp".to_string(), "SOURCES".to_string());
    map.insert(".h".to_string(), "HEADERS".to_string());
    map
}

fn write_manifest(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("CMakeLists.txt");
    fs::write(&path, content).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

const OPTS: EngineOptions = EngineOptions {
    nested_parens: true,
};

#[test]
fn add_appends_to_existing_block() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "set(SOURCES\n    \"a.cpp\"\n)\n");

    let outcome = add_entry(&manifest, &temp.path().join("b.cpp"), &cpp_mapping(), &OPTS).unwrap();
    assert_eq!(outcome, AddOutcome::Added);
    assert_eq!(
        read(&manifest),
        "set(SOURCES\n    \"a.cpp\"\n    \"b.cpp\"\n)\n"
    );
}

#[test]
fn add_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "set(SOURCES\n    \"a.cpp\"\n)\n");
    let file = temp.path().join("b.cpp");
    let map = cpp_mapping();

    add_entry(&manifest, &file, &map, &OPTS).unwrap();
    let after_first = read(&manifest);

    let outcome = add_entry(&manifest, &file, &map, &OPTS).unwrap();
    assert_eq!(outcome, AddOutcome::AlreadyPresent);
    assert_eq!(read(&manifest), after_first);
}

#[test]
fn remove_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(
        temp.path(),
        "set(SOURCES\n    \"a.cpp\"\n    \"b.cpp\"\n)\n",
    );
    let file = temp.path().join("b.cpp");
    let map = cpp_mapping();

    assert_eq!(
        remove_entry(&manifest, &file, &map, &OPTS).unwrap(),
        RemoveOutcome::Removed
    );
    let after_first = read(&manifest);

    assert_eq!(
        remove_entry(&manifest, &file, &map, &OPTS).unwrap(),
        RemoveOutcome::NotPresent
    );
    assert_eq!(read(&manifest), after_first);
}

#[test]
fn add_then_remove_round_trips_entry_set() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(
        temp.path(),
        "set(SOURCES\n    \"a.cpp\"\n    \"b.cpp\"\n)\n",
    );
    let file = temp.path().join("c.cpp");
    let map = cpp_mapping();

    let before = read(&manifest);
    add_entry(&manifest, &file, &map, &OPTS).unwrap();
    remove_entry(&manifest, &file, &map, &OPTS).unwrap();
    assert_eq!(read(&manifest), before);
}

#[test]
fn mutation_leaves_surrounding_text_untouched() {
    let temp = TempDir::new().unwrap();
    let prefix = "cmake_minimum_required(VERSION 3.20)\nproject(demo VERSION 1.2)\n\n# sources live here\n";
    let suffix = "\n\nadd_executable(demo ${SOURCES})\ntarget_link_libraries(demo PRIVATE fmt)\n";
    let manifest = write_manifest(
        temp.path(),
        &format!("{prefix}set(SOURCES\n    \"a.cpp\"\n){suffix}"),
    );

    add_entry(&manifest, &temp.path().join("b.cpp"), &cpp_mapping(), &OPTS).unwrap();

    let text = read(&manifest);
    assert!(text.starts_with(prefix));
    assert!(text.ends_with(suffix));
}

#[test]
fn existing_entries_keep_their_order_and_spelling() {
    let temp = TempDir::new().unwrap();
    // Odd spacing and an unusual order must survive the rewrite.
    let manifest = write_manifest(
        temp.path(),
        "set(SOURCES\n      \"z.cpp\"\n  \"a.cpp\"\n\n    \"m.cpp\"\n)\n",
    );

    add_entry(&manifest, &temp.path().join("b.cpp"), &cpp_mapping(), &OPTS).unwrap();

    assert_eq!(
        read(&manifest),
        "set(SOURCES\n    \"z.cpp\"\n    \"a.cpp\"\n    \"m.cpp\"\n    \"b.cpp\"\n)\n"
    );
}

#[test]
fn missing_block_reports_without_writing() {
    let temp = TempDir::new().unwrap();
    let original = "set(SOURCES\n    \"a.cpp\"\n)\n";
    let manifest = write_manifest(temp.path(), original);
    let map = cpp_mapping();

    let outcome = add_entry(&manifest, &temp.path().join("a.h"), &map, &OPTS).unwrap();
    assert_eq!(
        outcome,
        AddOutcome::BlockMissing {
            group: "HEADERS".to_string()
        }
    );
    assert_eq!(read(&manifest), original);
}

#[test]
fn create_block_then_add_succeeds() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(
        temp.path(),
        "project(demo)\n\nset(SOURCES\n    \"a.cpp\"\n)\n",
    );
    let map = cpp_mapping();

    create_blocks(&manifest, &["HEADERS".to_string()], &OPTS).unwrap();
    let text = read(&manifest);
    // Anchored after the last set() block, not after project().
    let sources_at = text.find("set(SOURCES").unwrap();
    let headers_at = text.find("set(HEADERS\n)").unwrap();
    assert!(headers_at > sources_at);

    let outcome = add_entry(&manifest, &temp.path().join("a.h"), &map, &OPTS).unwrap();
    assert_eq!(outcome, AddOutcome::Added);
    assert!(read(&manifest).contains("set(HEADERS\n    \"a.h\"\n)"));
}

#[test]
fn create_block_anchors_after_project_when_no_set_exists() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "project(demo)\n\nadd_subdirectory(lib)\n");

    create_blocks(&manifest, &["SOURCES".to_string()], &OPTS).unwrap();
    let text = read(&manifest);
    assert!(text.starts_with("project(demo)\n\nset(SOURCES\n)\n"));
}

#[test]
fn create_block_at_top_of_bare_file() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "add_subdirectory(lib)\n");

    create_blocks(&manifest, &["SOURCES".to_string()], &OPTS).unwrap();
    assert_eq!(read(&manifest), "set(SOURCES\n)\n\nadd_subdirectory(lib)\n");
}

#[test]
fn create_blocks_inserts_queued_groups_together_in_order() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "project(demo)\n");

    create_blocks(
        &manifest,
        &["SOURCES".to_string(), "HEADERS".to_string()],
        &OPTS,
    )
    .unwrap();
    let text = read(&manifest);
    let sources_at = text.find("set(SOURCES\n)").unwrap();
    let headers_at = text.find("set(HEADERS\n)").unwrap();
    assert!(sources_at < headers_at);
}

#[test]
fn removing_only_entry_keeps_block_shell() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "set(SOURCES\n    \"a.cpp\"\n)\n");

    let outcome =
        remove_entry(&manifest, &temp.path().join("a.cpp"), &cpp_mapping(), &OPTS).unwrap();
    assert_eq!(outcome, RemoveOutcome::Removed);
    assert_eq!(read(&manifest), "set(SOURCES\n)\n");
}

#[test]
fn entries_are_relative_to_manifest_directory() {
    let temp = TempDir::new().unwrap();
    let sub = temp.path().join("lib");
    fs::create_dir_all(sub.join("src")).unwrap();
    let manifest = write_manifest(&sub, "set(SOURCES\n    \"src/a.cpp\"\n)\n");

    add_entry(
        &manifest,
        &sub.join("src").join("b.cpp"),
        &cpp_mapping(),
        &OPTS,
    )
    .unwrap();
    assert!(read(&manifest).contains("    \"src/b.cpp\"\n"));
}

#[test]
fn include_block_auto_created_after_project() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "project(demo)\n\nset(SOURCES\n    \"a.cpp\"\n)\n");

    let outcome = add_include_dir(&manifest, &temp.path().join("include"), &OPTS).unwrap();
    assert_eq!(outcome, AddOutcome::Added);

    let text = read(&manifest);
    let project_at = text.find("project(demo)").unwrap();
    let include_at = text.find("include_directories(").unwrap();
    let sources_at = text.find("set(SOURCES").unwrap();
    assert!(project_at < include_at && include_at < sources_at);
}

#[test]
fn unmapped_extension_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    let manifest = write_manifest(temp.path(), "set(SOURCES\n)\n");

    let err = add_entry(&manifest, &temp.path().join("a.rs"), &cpp_mapping(), &OPTS).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains(".rs"));
}

#[test]
fn missing_manifest_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("CMakeLists.txt");

    let err = add_entry(&manifest, &temp.path().join("a.cpp"), &cpp_mapping(), &OPTS).unwrap_err();
    assert!(!err.is_config());
    assert!(err.to_string().contains("CMakeLists.txt"));
}
