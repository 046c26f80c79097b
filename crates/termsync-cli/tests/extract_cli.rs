use assert_cmd::prelude::*;
use predicates::prelude::*;

mod helpers;
use helpers::*;

const COMMON: &str = r#"{
  "namespace": "Common",
  "messages": {
    "cancel": { "id": "cancel", "message": "Cancel" },
    "ok": { "id": "ok", "message": "OK" }
  }
}"#;

#[test]
fn first_run_marks_all_terms_added() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    write(root, "src/common/messages.json", COMMON);

    let assert = bin_cmd(root)
        .args(["extract", "--format", "json"])
        .assert()
        .success();
    let summary = json_summary(&assert.get_output().stdout);
    assert_eq!(summary["version"], "1");
    assert_eq!(summary["added"], 2);
    assert_eq!(summary["files"], 1);

    let reg = read_json(&registry_path(root));
    assert_eq!(reg["version"], "1");
    assert_eq!(reg["terms"]["Common.cancel"]["status"], "added");
    assert_eq!(reg["terms"]["Common.cancel"]["message"], "Cancel");
    assert!(reg["terms"]["Common.cancel"].get("previousMessage").is_none());
}

#[test]
fn changed_message_becomes_updated_and_version_bumps() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    let decl = write(
        root,
        "src/containers/Home/messages.json",
        r#"{"add": {"id": "add", "message": "Add new"}}"#,
    );
    bin_cmd(root).arg("extract").assert().success();

    std::fs::write(&decl, r#"{"add": {"id": "add", "message": "Add item"}}"#).unwrap();
    bin_cmd(root).arg("extract").assert().success();

    let reg = read_json(&registry_path(root));
    assert_eq!(reg["version"], "2");
    let term = &reg["terms"]["add"];
    assert_eq!(term["status"], "updated");
    assert_eq!(term["message"], "Add item");
    assert_eq!(term["previousMessage"], "Add new");
}

#[test]
fn rerun_without_changes_is_unchanged_but_new_version() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    write(root, "src/common/messages.json", COMMON);
    bin_cmd(root).arg("extract").assert().success();

    let assert = bin_cmd(root)
        .args(["extract", "--format", "json"])
        .assert()
        .success();
    let summary = json_summary(&assert.get_output().stdout);
    assert_eq!(summary["version"], "2");
    assert_eq!(summary["unchanged"], 2);
    assert_eq!(summary["added"], 0);
    assert_eq!(summary["updated"], 0);
}

#[test]
fn deleted_declaration_marks_removed_with_old_text() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    let task = write(
        root,
        "src/components/Task/messages.json",
        r#"{"namespace": "Task", "messages": {"remove": {"id": "actions.remove", "message": "Delete"}}}"#,
    );
    write(root, "src/common/messages.json", COMMON);
    bin_cmd(root).arg("extract").assert().success();

    std::fs::remove_file(task).unwrap();
    bin_cmd(root).arg("extract").assert().success();

    let reg = read_json(&registry_path(root));
    assert_eq!(reg["terms"]["Task.actions.remove"]["status"], "removed");
    assert_eq!(reg["terms"]["Task.actions.remove"]["message"], "Delete");
}

#[test]
fn plural_messages_flatten_per_category() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    write(
        root,
        "src/containers/Home/messages.toml",
        r#"
[tasks]
id = "x"
description = "Task counter"

[tasks.message]
one = "1 item"
other = "{{count}} items"
"#,
    );
    bin_cmd(root).arg("extract").assert().success();

    let reg = read_json(&registry_path(root));
    let ids: Vec<&String> = reg["terms"].as_object().unwrap().keys().collect();
    assert_eq!(ids, vec!["x_one", "x_other"]);
    assert_eq!(reg["terms"]["x_one"]["description"], "Task counter");
}

#[test]
fn list_shows_descriptive_terms() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    write(
        root,
        "src/common/task.messages.json",
        r#"{"low": {"id": "priority.low", "message": "Low", "description": "Task priority"}}"#,
    );
    bin_cmd(root)
        .args(["extract", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ priority.low: Low [Task priority]"))
        .stdout(predicate::str::contains("Generated file version 1"));
}

#[test]
fn malformed_declaration_fails_without_writing_registry() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    write(root, "src/common/messages.json", r#"{"ok": {"message": "OK"}}"#);

    bin_cmd(root)
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
    assert!(!registry_path(root).exists());
}

#[test]
fn project_config_controls_paths_and_pattern() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    write(
        root,
        "termsync.toml",
        r#"
source_root = "app"
registry_path = "i18n/terms.json"
messages_pattern = "strings\\.json$"
"#,
    );
    write(root, "app/ui/strings.json", r#"{"ok": {"id": "ok", "message": "OK"}}"#);
    write(root, "app/ui/messages.json", r#"{"no": {"id": "ignored", "message": "x"}}"#);

    bin_cmd(root).arg("extract").assert().success();

    let reg = read_json(&root.join("i18n").join("terms.json"));
    assert_eq!(reg["terms"]["ok"]["status"], "added");
    assert!(reg["terms"].get("ignored").is_none());
}

#[test]
fn schema_command_writes_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    bin_cmd(root)
        .args(["schema", "--out-dir", "schemas"])
        .assert()
        .success();
    for name in [
        "term_registry.schema.json",
        "declaration_file.schema.json",
        "extract_summary.schema.json",
        "update_summary.schema.json",
    ] {
        assert!(root.join("schemas").join(name).is_file(), "{name} missing");
    }
}
