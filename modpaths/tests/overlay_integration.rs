//! Integration tests for the overlay filesystem.
//!
//! An overlay maps caller-visible paths to the locations physical I/O is
//! performed on. These tests run it over both the real and the in-memory
//! filesystem.

mod common;

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};

use common::{full_paths, memory_fs_with, RealFixture};
use modpaths::config::{Config, OverlayMapping};
use modpaths::{FileSystem, FileSystemRef};

#[test]
fn test_open_redirects_to_target_on_disk() {
    let fixture = RealFixture::new();
    let a = fixture.path("game/Data/plugin.esp");
    let b = fixture.path("staging/plugin.esp");
    fs::create_dir_all(fixture.dir.path().join("staging")).unwrap();
    fs::write(fixture.dir.path().join("staging").join("plugin.esp"), b"TES4").unwrap();

    let overlay = fixture
        .fs
        .create_overlay_file_system(HashMap::from([(a.clone(), b.clone())]));
    let a_over = a.with_file_system(overlay.clone());

    let mut contents = String::new();
    overlay
        .read_file(&a_over)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "TES4");

    // The caller's view of the path is untouched
    assert_eq!(a_over.to_string(), a.to_string());
    assert!(!a.file_exists());
}

#[test]
fn test_write_through_overlay_updates_target() {
    let fixture = RealFixture::new();
    let a = fixture.path("virtual.ini");
    let b = fixture.path("real.ini");

    let overlay = fixture
        .fs
        .create_overlay_file_system(HashMap::from([(a.clone(), b.clone())]));

    {
        let mut stream = overlay.create_file(&a).unwrap();
        stream.write_all(b"[General]\n").unwrap();
    }

    assert!(!a.file_exists());
    assert_eq!(
        fs::read_to_string(fixture.dir.path().join("real.ini")).unwrap(),
        "[General]\n"
    );
}

#[test]
fn test_directory_mapping_redirects_enumeration() {
    let memory = memory_fs_with(&[
        ("/profiles/default/plugins.txt", "*a.esp"),
        ("/profiles/default/loadorder.txt", "a.esp"),
    ]);
    let visible = memory.from_full_path("/game/appdata");
    let actual = memory.from_full_path("/profiles/default");

    let overlay = memory.create_overlay_file_system(HashMap::from([(visible.clone(), actual)]));
    let found = overlay.enumerate_files(&visible, "*.txt", false).unwrap();

    assert_eq!(
        full_paths(&found),
        vec![
            "/profiles/default/loadorder.txt",
            "/profiles/default/plugins.txt"
        ]
    );
    assert_eq!(found[1].read_all_text().unwrap(), "*a.esp");
}

#[test]
fn test_overlay_from_config() {
    let memory = memory_fs_with(&[("/real/b.txt", "from config")]);
    let base: FileSystemRef = memory.handle();

    let config = Config {
        overlay: Some(vec![OverlayMapping {
            from: "/mods/a.txt".to_string(),
            to: "/real/b.txt".to_string(),
        }]),
        ..Default::default()
    };
    let overlay = base.create_overlay_file_system(config.overlay_mappings(&base));

    let a = overlay.from_full_path("/mods/a.txt");
    assert_eq!(a.read_all_text().unwrap(), "from config");
}

#[test]
fn test_move_through_overlay() {
    let memory = memory_fs_with(&[("/real/src.bin", "data")]);
    let src = memory.from_full_path("/virtual/src.bin");
    let dest = memory.from_full_path("/virtual/dest.bin");
    let real_src = memory.from_full_path("/real/src.bin");
    let real_dest = memory.from_full_path("/real/dest.bin");

    let overlay = memory.create_overlay_file_system(HashMap::from([
        (src.clone(), real_src.clone()),
        (dest.clone(), real_dest.clone()),
    ]));

    src.with_file_system(overlay.clone())
        .move_to(&dest.with_file_system(overlay), false)
        .unwrap();

    assert!(!real_src.file_exists());
    assert_eq!(real_dest.read_all_text().unwrap(), "data");
}
