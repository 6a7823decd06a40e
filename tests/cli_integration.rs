use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RECORD: &str = r#"[{"start":{"row":5,"column":0},"end":{"row":6,"column":0}}]"#;

fn refold(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("refold").unwrap();
    cmd.current_dir(root).env_remove("REFOLD_LOG");
    cmd
}

fn seeded_project() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join(".js-folds");
    fs::create_dir(&store).unwrap();
    fs::write(store.join("config.json"), "{}").unwrap();
    fs::write(
        store.join("foldsPropaties.json"),
        r#"{"/work/a.js": "ab12cd34", "/work/b.js": "ff00ee11"}"#,
    )
    .unwrap();
    fs::write(store.join("ab12cd34.json"), RECORD).unwrap();
    temp
}

#[test]
fn init_creates_store() {
    let temp = tempfile::tempdir().unwrap();

    refold(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized fold store"));

    let store = temp.path().join(".js-folds");
    assert_eq!(fs::read_to_string(store.join("config.json")).unwrap(), "{}");
    assert_eq!(
        fs::read_to_string(store.join("foldsPropaties.json")).unwrap(),
        "{}"
    );
}

#[test]
fn missing_store_is_reported() {
    let temp = tempfile::tempdir().unwrap();

    refold(temp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .js-folds directory"));
}

#[test]
fn inspection_commands_leave_store_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join(".js-folds");
    fs::create_dir(&store).unwrap();

    for args in [&["list"][..], &["doctor"], &["config"]] {
        refold(temp.path()).args(args).assert().success();
    }
    assert_eq!(fs::read_dir(&store).unwrap().count(), 0);
}

#[test]
fn blank_mapping_is_an_error() {
    let temp = seeded_project();
    let index = temp.path().join(".js-folds").join("foldsPropaties.json");
    fs::write(&index, "").unwrap();

    refold(temp.path()).arg("list").assert().failure();
    assert_eq!(fs::read_to_string(&index).unwrap(), "");
}

#[test]
fn list_shows_tracked_files() {
    let temp = seeded_project();

    refold(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("/work/a.js"))
        .stdout(predicate::str::contains("ab12cd34"))
        .stdout(predicate::str::contains("1 fold"))
        .stdout(predicate::str::contains("no folds"));
}

#[test]
fn list_from_subdirectory_finds_store() {
    let temp = seeded_project();
    let sub = temp.path().join("src").join("deep");
    fs::create_dir_all(&sub).unwrap();

    refold(&sub)
        .assert()
        .success()
        .stdout(predicate::str::contains("/work/b.js"));
}

#[test]
fn show_prints_one_based_positions() {
    let temp = seeded_project();

    refold(temp.path())
        .args(["show", "/work/a.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6:1 → 7:1"));
}

#[test]
fn show_unknown_file_fails() {
    let temp = seeded_project();

    refold(temp.path())
        .args(["show", "/work/zzz.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/work/zzz.js"));
}

#[test]
fn rename_moves_folds() {
    let temp = seeded_project();

    refold(temp.path())
        .args(["rename", "/work/a.js", "/work/renamed.js"])
        .assert()
        .success();

    refold(temp.path())
        .args(["show", "/work/renamed.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6:1 → 7:1"));

    let mapping =
        fs::read_to_string(temp.path().join(".js-folds").join("foldsPropaties.json")).unwrap();
    assert!(mapping.contains("/work/renamed.js"));
    assert!(!mapping.contains("\"/work/a.js\""));
}

#[test]
fn malformed_record_is_a_warning_not_a_failure() {
    let temp = seeded_project();
    fs::write(temp.path().join(".js-folds").join("ab12cd34.json"), "[{oops").unwrap();

    refold(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Folds not restored")
                .and(predicate::str::contains("ab12cd34")),
        );
}

#[test]
fn doctor_reports_orphans() {
    let temp = seeded_project();
    fs::write(temp.path().join(".js-folds").join("deadbeef.json"), "[]").unwrap();

    refold(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadbeef.json"))
        .stdout(predicate::str::contains("no folds saved yet"));
}

#[test]
fn explicit_root_must_exist() {
    let temp = tempfile::tempdir().unwrap();

    refold(temp.path())
        .args(["--root", "does-not-exist", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
