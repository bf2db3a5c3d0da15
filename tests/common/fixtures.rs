//! App tree fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor for a unit at `version` with a label and a build number
pub fn descriptor(version: &str, label: &str) -> String {
    format!(
        "# managed by release tooling\n\
         [install]\n\
         is_configured = 0\n\
         build = 202401010000\n\
         \n\
         [ui]\n\
         is_visible = 1\n\
         label = {label}\n\
         \n\
         [launcher]\n\
         author = Platform Team\n\
         version = {version}\n\
         label = {label} v{version}\n"
    )
}

/// Write a complete, valid app under `root/name`
pub fn write_app(root: &Path, name: &str, version: &str) -> PathBuf {
    let unit = root.join(name);
    fs::create_dir_all(unit.join("default")).unwrap();
    fs::create_dir_all(unit.join("metadata")).unwrap();
    fs::create_dir_all(unit.join("bin")).unwrap();
    fs::write(
        unit.join("default/app.conf"),
        descriptor(version, &format!("{name} app")),
    )
    .unwrap();
    fs::write(unit.join("metadata/default.meta"), "[]\naccess = read : [ * ]\n").unwrap();
    fs::write(unit.join("bin/collect.py"), "print('collect')\n").unwrap();
    fs::write(unit.join("README.txt"), format!("{name}\n")).unwrap();
    unit
}

/// Read `key` from `[launcher]` in the unit's descriptor
pub fn launcher_value(unit: &Path, key: &str) -> Option<String> {
    section_value(unit, "launcher", key)
}

/// Read `key` from `[section]` in the unit's descriptor
pub fn section_value(unit: &Path, section: &str, key: &str) -> Option<String> {
    let content = fs::read_to_string(unit.join("default/app.conf")).ok()?;
    let header = format!("[{section}]");
    let mut inside = false;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            inside = trimmed == header;
            continue;
        }
        if inside {
            if let Some((k, v)) = trimmed.split_once('=') {
                if k.trim() == key {
                    return Some(v.trim().to_string());
                }
            }
        }
    }
    None
}

/// Every file under `root`, as sorted relative paths with their contents
pub fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = walkdir::WalkDir::new(root)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (rel, fs::read(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}
