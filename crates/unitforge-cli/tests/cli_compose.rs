use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn unitforge_cmd() -> Command {
    Command::cargo_bin("unitforge").unwrap()
}

fn write_unit(root: &Path, name: &str, version: &str, content: &str, includes: &[&str]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    let includes_toml = includes
        .iter()
        .map(|r| format!("\"{r}\""))
        .collect::<Vec<_>>()
        .join(", ");
    fs::write(
        dir.join("Unit.toml"),
        format!(
            "[unit]\nname = \"{name}\"\nversion = \"{version}\"\nincludes = [{includes_toml}]\n"
        ),
    )
    .unwrap();
    fs::write(dir.join("UNIT.md"), content).unwrap();
}

#[test]
fn test_compose_prints_merged_document() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "base-style", "1.0.0", "Base rules.\n", &[]);
    write_unit(
        tmp.path(),
        "rust-idioms",
        "1.2.0",
        "Idiom rules.\n",
        &["base-style@^1.0.0"],
    );

    let assert = unitforge_cmd()
        .args(["compose", "rust-idioms", "--dir"])
        .arg(tmp.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let base_pos = stdout.find("## base-style@1.0.0").unwrap();
    let root_pos = stdout.find("## rust-idioms@1.2.0").unwrap();
    assert!(base_pos < root_pos, "includes must precede the root section");
    assert!(stdout.contains("\n---\n"));
}

#[test]
fn test_compose_writes_output_file() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "solo", "1.0.0", "Solo body.\n", &[]);
    let out = tmp.path().join("composed.md");

    unitforge_cmd()
        .args(["compose", "solo", "--dir"])
        .arg(tmp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Composed"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, "## solo@1.0.0\n\nSolo body.\n");
}

#[test]
fn test_compose_diamond_includes_shared_once() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "shared", "1.0.0", "s\n", &[]);
    write_unit(tmp.path(), "left", "1.0.0", "l\n", &["shared@^1.0.0"]);
    write_unit(tmp.path(), "right", "1.0.0", "r\n", &["shared@^1.0.0"]);
    write_unit(
        tmp.path(),
        "app",
        "1.0.0",
        "a\n",
        &["left@^1.0.0", "right@^1.0.0"],
    );

    unitforge_cmd()
        .args(["compose", "app", "--dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("## shared@1.0.0").count(1));
}

#[test]
fn test_compose_unknown_unit_fails() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "solo", "1.0.0", "s\n", &[]);

    unitforge_cmd()
        .args(["compose", "missing", "--dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_compose_cycle_reports_path() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "a", "1.0.0", "", &["b@1.0.0"]);
    write_unit(tmp.path(), "b", "1.0.0", "", &["a@1.0.0"]);

    unitforge_cmd()
        .args(["compose", "a", "--dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("a -> b -> a"));
}

#[test]
fn test_tree_renders_include_graph() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "base-style", "1.0.0", "b\n", &[]);
    write_unit(
        tmp.path(),
        "rust-idioms",
        "1.2.0",
        "i\n",
        &["base-style@^1.0.0"],
    );

    unitforge_cmd()
        .args(["tree", "rust-idioms", "--dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("rust-idioms@1.2.0"))
        .stdout(predicate::str::contains("└── base-style@1.0.0"));
}
