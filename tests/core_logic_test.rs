use git2::Repository;
use nexkit_exclude::builders::patterns::{ProfileId, patterns_for};
use nexkit_exclude::builders::section::SECTION_START_MARKER;
use nexkit_exclude::core::config::Settings;
use nexkit_exclude::core::engine::ExclusionEngine;
use nexkit_exclude::core::error::ExclusionError;
use nexkit_exclude::core::git::{Git2Client, GitCli, GitClient};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup_test_repo() -> (TempDir, Repository, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    (dir, repo, root)
}

fn track(repo: &Repository, root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "tracked\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(relative)).unwrap();
    index.write().unwrap();
}

fn clients() -> Vec<(&'static str, Box<dyn GitClient>)> {
    let cli: Box<dyn GitClient> = Box::new(GitCli::default());
    let libgit2: Box<dyn GitClient> = Box::new(Git2Client::new());
    vec![("git cli", cli), ("libgit2", libgit2)]
}

fn engine(client: Box<dyn GitClient>) -> ExclusionEngine {
    ExclusionEngine::new(client, Settings::default())
}

#[test]
fn test_resolve_root_from_subdirectory() {
    let (_td, _repo, root) = setup_test_repo();
    let nested = root.join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("file.rs"), "").unwrap();

    for (name, client) in clients() {
        assert!(client.is_under_version_control(&nested), "{name}");
        assert_eq!(client.resolve_root(&nested), Some(root.clone()), "{name}");
        assert_eq!(
            client.resolve_root(&nested.join("file.rs")),
            Some(root.clone()),
            "{name}"
        );
    }
}

#[test]
fn test_non_repository_is_rejected_without_writes() {
    let dir = tempfile::tempdir().unwrap();

    for (name, client) in clients() {
        assert!(!client.is_under_version_control(dir.path()), "{name}");
        assert_eq!(client.resolve_root(dir.path()), None, "{name}");

        let engine = engine(client);
        for outcome in [
            engine.add_exclusions(dir.path(), None).map(|_| ()),
            engine.remove_exclusions(dir.path()).map(|_| ()),
            engine.check_status(dir.path(), None).map(|_| ()),
        ] {
            assert!(
                matches!(outcome, Err(ExclusionError::NotARepository(_))),
                "{name}"
            );
        }
    }
    assert!(!dir.path().join(".gitignore").exists());
}

#[test]
fn test_missing_git_binary() {
    let (_td, _repo, root) = setup_test_repo();
    let client = GitCli::new("/nonexistent/bin/git-missing");

    assert!(!client.is_under_version_control(&root));
    assert_eq!(client.resolve_root(&root), None);
    assert!(matches!(
        client.list_tracked(&root, "specs"),
        Err(ExclusionError::ToolUnavailable(_))
    ));
}

#[test]
fn test_list_tracked_under_prefix() {
    let (_td, repo, root) = setup_test_repo();
    track(&repo, &root, "specs/001/plan.md");
    track(&repo, &root, "specs/002/spec.md");
    track(&repo, &root, "specsheet.txt");
    track(&repo, &root, "README.md");

    for (name, client) in clients() {
        let mut files = client.list_tracked(&root, "specs").unwrap();
        files.sort();
        assert_eq!(
            files,
            vec![
                PathBuf::from("specs/001/plan.md"),
                PathBuf::from("specs/002/spec.md")
            ],
            "{name}"
        );
        assert!(
            client.list_tracked(&root, ".specify").unwrap().is_empty(),
            "{name}"
        );
    }
}

#[test]
fn test_core_workflow() {
    let (_td, _repo, root) = setup_test_repo();
    let original = "# My project\n*.log\n__pycache__/";
    fs::write(root.join(".gitignore"), original).unwrap();

    for (name, client) in clients() {
        let engine = engine(client);

        // 1. Add
        let added = engine.add_exclusions(&root, None).unwrap();
        assert!(added.success, "{name}");
        assert!(!added.already_configured, "{name}");
        assert_eq!(added.git_root, root, "{name}");
        assert_eq!(added.patterns_affected, patterns_for(None), "{name}");
        let content = fs::read_to_string(root.join(".gitignore")).unwrap();
        assert!(content.contains(original), "{name}");
        assert!(content.contains(SECTION_START_MARKER), "{name}");

        // 2. Add again
        let again = engine.add_exclusions(&root, None).unwrap();
        assert!(again.already_configured, "{name}");
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            content,
            "{name}"
        );

        // 3. Status
        let status = engine.check_status(&root, None).unwrap();
        assert!(status.is_excluded, "{name}");
        assert!(status.missing_patterns.is_empty(), "{name}");
        assert!(!status.requires_cleanup, "{name}");

        // 4. Remove
        let removed = engine.remove_exclusions(&root).unwrap();
        assert!(removed.success, "{name}");
        assert_eq!(removed.patterns_affected, patterns_for(None), "{name}");
        let restored = fs::read_to_string(root.join(".gitignore")).unwrap();
        assert_eq!(restored.trim_end(), original.trim_end(), "{name}");
    }

    // nothing left behind by the atomic writes
    assert!(!root.join(".gitignore.tmp").exists());
}

#[test]
fn test_tracked_files_are_reported() {
    let (_td, repo, root) = setup_test_repo();
    track(&repo, &root, ".specify/memory/constitution.md");
    track(&repo, &root, ".claude/commands/nexkit.plan.md");
    track(&repo, &root, "src/lib.rs");

    for (name, client) in clients() {
        let engine = engine(client);

        let status = engine.check_status(&root, None).unwrap();
        assert!(status.requires_cleanup, "{name}");
        assert!(!status.is_excluded, "{name}");
        // .claude/commands exists, so claude is detected
        assert_eq!(status.profile, ProfileId::parse("claude"), "{name}");
        assert_eq!(
            status.tracked_files,
            vec![
                PathBuf::from(".specify/memory/constitution.md"),
                PathBuf::from(".claude/commands/nexkit.plan.md")
            ],
            "{name}"
        );

        let added = engine.add_exclusions(&root, None).unwrap();
        assert_eq!(added.tracked_files, status.tracked_files, "{name}");
        engine.remove_exclusions(&root).unwrap();
    }
}

#[test]
fn test_remove_noops_do_not_create_files() {
    let (_td, _repo, root) = setup_test_repo();

    for (name, client) in clients() {
        let engine = engine(client);
        let result = engine.remove_exclusions(&root).unwrap();
        assert!(result.success, "{name}");
        assert!(result.patterns_affected.is_empty(), "{name}");
        assert!(!root.join(".gitignore").exists(), "{name}");
    }

    fs::write(root.join(".gitignore"), "target/\n").unwrap();
    for (name, client) in clients() {
        let engine = engine(client);
        let result = engine.remove_exclusions(&root).unwrap();
        assert!(result.success, "{name}");
        assert!(result.patterns_affected.is_empty(), "{name}");
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            "target/\n",
            "{name}"
        );
    }
}

#[test]
fn test_unqueryable_listing_yields_no_matches() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_repo = Git2Client::new();
    assert!(not_a_repo.list_tracked(dir.path(), "specs").unwrap().is_empty());

    // a directory cannot be run as the git binary
    let (_td, repo, root) = setup_test_repo();
    track(&repo, &root, "specs/plan.md");
    let unrunnable = GitCli::new(dir.path());
    assert!(unrunnable.list_tracked(&root, "specs").unwrap().is_empty());
}
