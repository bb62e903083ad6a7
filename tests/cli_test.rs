use assert_cmd::Command;
use git2::Repository;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn nexkit() -> Command {
    Command::cargo_bin("nexkit-exclude").unwrap()
}

fn setup_test_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

#[test]
fn test_add_then_remove() {
    let (td, _repo) = setup_test_repo();
    fs::write(td.path().join(".gitignore"), "*.log\n").unwrap();

    nexkit()
        .arg("add")
        .arg(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully added nexkit exclusions",
        ));

    nexkit()
        .arg("add")
        .arg(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already configured"));

    nexkit()
        .arg("remove")
        .arg(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully removed nexkit exclusions",
        ));

    assert_eq!(
        fs::read_to_string(td.path().join(".gitignore")).unwrap(),
        "*.log\n"
    );
}

#[test]
fn test_add_in_current_directory_with_agent() {
    let (td, _repo) = setup_test_repo();

    nexkit()
        .current_dir(td.path())
        .args(["add", "--agent", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".claude/modes/"));

    let content = fs::read_to_string(td.path().join(".gitignore")).unwrap();
    assert!(content.contains("# Agent: claude"));
}

#[test]
fn test_not_a_repository_fails() {
    let dir = tempfile::tempdir().unwrap();

    for command in ["add", "remove", "status"] {
        nexkit()
            .arg(command)
            .arg(dir.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Not a git repository"));
    }
    assert!(!dir.path().join(".gitignore").exists());
}

#[test]
fn test_remove_without_gitignore() {
    let (td, _repo) = setup_test_repo();

    nexkit()
        .arg("remove")
        .arg(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No .gitignore file found"));
}

#[test]
fn test_add_shows_cleanup_guidance() {
    let (td, repo) = setup_test_repo();
    fs::create_dir_all(td.path().join(".specify")).unwrap();
    fs::write(td.path().join(".specify/test.txt"), "test").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(".specify/test.txt")).unwrap();
    index.write().unwrap();

    nexkit()
        .arg("add")
        .arg(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tracked in git"))
        .stdout(predicate::str::contains("git rm --cached .specify/test.txt"));
}

#[test]
fn test_status_as_json() {
    let (td, _repo) = setup_test_repo();

    let output = nexkit()
        .args(["status", "--format", "json"])
        .arg(td.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["is_excluded"], false);
    assert_eq!(status["has_gitignore"], false);
    assert_eq!(status["requires_cleanup"], false);
    assert_eq!(status["gitignore_path"], serde_json::Value::Null);
    assert_eq!(status["missing_patterns"][0], ".specify/");
}

#[test]
fn test_libgit2_backend_from_config() {
    let (td, _repo) = setup_test_repo();
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_dir.path().join("nexkit.toml");
    fs::write(&config, "backend = \"libgit2\"\n").unwrap();

    nexkit()
        .arg("--config")
        .arg(&config)
        .arg("add")
        .arg(td.path())
        .assert()
        .success();

    assert!(td.path().join(".gitignore").exists());
}

#[test]
fn test_patterns_for_agent() {
    nexkit()
        .args(["patterns", "--agent", "q", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".amazonq/prompts/nexkit.*"));
}
