#![allow(dead_code)]

use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use assert_cmd::Command;

const ENV_KEYS: &[&str] = &[
    "TERMSYNC_SOURCE_ROOT",
    "TERMSYNC_TRANSLATIONS_DIR",
    "TERMSYNC_REGISTRY",
    "TERMSYNC_MESSAGES_PATTERN",
    "TERMSYNC_LANGUAGES",
    "TERMSYNC_DEFAULT_LANGUAGE",
    "TERMSYNC_LOG_DIR",
];

/// Binary command isolated from the caller's environment and user config.
pub fn bin_cmd(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("termsync").expect("termsync binary built");
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    let home = project.join(".home");
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .arg("--no-color")
        .arg("--project-dir")
        .arg(project);
    cmd
}

pub fn write(root: &Path, rel: &str, body: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
    fs::write(&path, body).expect("write fixture");
    path
}

pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("parse {}: {e}", path.display()))
}

/// Last non-empty stdout line parsed as JSON.
pub fn json_summary(stdout: &[u8]) -> Value {
    let out = String::from_utf8_lossy(stdout);
    let line = out
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .expect("have json line");
    serde_json::from_str(line).expect("json summary")
}

pub fn registry_path(project: &Path) -> PathBuf {
    project.join("src").join("translations").join("terms.json")
}

pub fn translation_path(project: &Path, lang: &str) -> PathBuf {
    project
        .join("src")
        .join("translations")
        .join(format!("{lang}.json"))
}
