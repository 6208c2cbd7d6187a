//! GitAdapter tests against real temporary repositories, including push
//! and pull through a local bare remote.

use anyhow::Result;
use gitrelay::adapters::git::GitAdapter;
use gitrelay_core::command::{CheckoutParams, CommitParams, PullParams, PushParams, StageParams};
use gitrelay_core::domain::{RepoEntry, RepoId};
use gitrelay_core::ports::{GitPort, ProgressSink};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&self, _: &str, _: &str, _: u8) {}
}

/// Collects (stage, percent) pairs for assertions on progress plumbing.
#[derive(Default)]
struct CollectingProgress {
    updates: Mutex<Vec<(String, u8)>>,
}

impl ProgressSink for CollectingProgress {
    fn update(&self, stage: &str, _: &str, percent: u8) {
        self.updates.lock().unwrap().push((stage.to_string(), percent));
    }
}

fn init_repo(path: &Path) -> Result<git2::Repository> {
    let repo = git2::Repository::init(path)?;
    let mut config = repo.config()?;
    config.set_str("user.name", "Test User")?;
    config.set_str("user.email", "test@example.com")?;
    Ok(repo)
}

fn entry_for(path: &Path, remotes: &[&str]) -> RepoEntry {
    RepoEntry {
        id: RepoId(1),
        name: path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        local_path: path.to_path_buf(),
        remotes: remotes.iter().map(|r| r.to_string()).collect(),
    }
}

/// Setup helper: write a file, stage it, and commit directly through git2.
fn commit_file(repo: &git2::Repository, name: &str, content: &str, message: &str) -> Result<git2::Oid> {
    let workdir = repo.workdir().expect("repo has a workdir");
    fs::write(workdir.join(name), content)?;
    let mut index = repo.index()?;
    index.add_path(Path::new(name))?;
    index.write()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let signature = repo.signature()?;
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    Ok(repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?)
}

fn head_message(repo: &git2::Repository) -> String {
    repo.head()
        .and_then(|h| h.peel_to_commit())
        .map(|c| c.message().unwrap_or("").to_string())
        .expect("HEAD should be a commit")
}

#[test]
fn test_stage_respects_pattern() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = init_repo(temp_dir.path())?;
    fs::write(temp_dir.path().join("a.txt"), "alpha")?;
    fs::write(temp_dir.path().join("b.md"), "beta")?;

    let adapter = GitAdapter::new();
    let entry = entry_for(temp_dir.path(), &[]);
    adapter.stage(
        &entry,
        &StageParams {
            pattern: "*.txt".to_string(),
        },
        &NullProgress,
    )?;

    let index = repo.index()?;
    assert!(index.get_path(Path::new("a.txt"), 0).is_some());
    assert!(index.get_path(Path::new("b.md"), 0).is_none());
    Ok(())
}

#[test]
fn test_stage_then_commit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = init_repo(temp_dir.path())?;
    fs::write(temp_dir.path().join("a.txt"), "alpha")?;

    let adapter = GitAdapter::new();
    let entry = entry_for(temp_dir.path(), &[]);
    adapter.stage(
        &entry,
        &StageParams {
            pattern: "a.txt".to_string(),
        },
        &NullProgress,
    )?;

    let progress = CollectingProgress::default();
    adapter.commit(
        &entry,
        &CommitParams {
            message: "add alpha".to_string(),
            amend: false,
            stage_all: false,
            author_name: None,
            author_email: None,
        },
        &progress,
    )?;

    assert_eq!(head_message(&repo), "add alpha");
    let updates = progress.updates.lock().unwrap();
    assert!(updates.iter().any(|(stage, _)| stage == "Committing changes"));
    assert_eq!(updates.last().map(|(_, p)| *p), Some(100));
    Ok(())
}

#[test]
fn test_commit_with_empty_message_and_stage_all() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = init_repo(temp_dir.path())?;
    fs::write(temp_dir.path().join("a.txt"), "alpha")?;

    let adapter = GitAdapter::new();
    let entry = entry_for(temp_dir.path(), &[]);
    adapter.commit(
        &entry,
        &CommitParams {
            message: String::new(),
            amend: false,
            stage_all: true,
            author_name: None,
            author_email: None,
        },
        &NullProgress,
    )?;

    assert_eq!(head_message(&repo), "");
    // stage_all picked the file up without a prior stage command.
    let commit = repo.head()?.peel_to_commit()?;
    assert!(commit.tree()?.get_name("a.txt").is_some());
    Ok(())
}

#[test]
fn test_commit_amend_and_explicit_author() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = init_repo(temp_dir.path())?;
    commit_file(&repo, "a.txt", "alpha", "first")?;

    let adapter = GitAdapter::new();
    let entry = entry_for(temp_dir.path(), &[]);
    adapter.commit(
        &entry,
        &CommitParams {
            message: "second".to_string(),
            amend: true,
            stage_all: false,
            author_name: Some("Alice".to_string()),
            author_email: Some("alice@example.com".to_string()),
        },
        &NullProgress,
    )?;

    let commit = repo.head()?.peel_to_commit()?;
    assert_eq!(commit.message().unwrap_or(""), "second");
    assert_eq!(commit.author().name(), Some("Alice"));
    assert_eq!(commit.parent_count(), 0, "amend must not add a parent");
    Ok(())
}

#[test]
fn test_checkout_branch_moves_head() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = init_repo(temp_dir.path())?;
    let first = commit_file(&repo, "a.txt", "v1", "first")?;
    repo.branch("feature", &repo.find_commit(first)?, false)?;
    commit_file(&repo, "a.txt", "v2", "second")?;

    let adapter = GitAdapter::new();
    let entry = entry_for(temp_dir.path(), &[]);
    adapter.checkout(
        &entry,
        &CheckoutParams {
            commit: None,
            branch: Some("feature".to_string()),
        },
        &NullProgress,
    )?;

    assert!(!repo.head_detached()?);
    assert_eq!(repo.head()?.shorthand(), Some("feature"));
    assert_eq!(repo.head()?.peel_to_commit()?.id(), first);
    assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt"))?, "v1");
    Ok(())
}

#[test]
fn test_checkout_commit_takes_precedence_over_branch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = init_repo(temp_dir.path())?;
    let first = commit_file(&repo, "a.txt", "v1", "first")?;
    repo.branch("feature", &repo.find_commit(first)?, false)?;
    let second = commit_file(&repo, "a.txt", "v2", "second")?;

    let adapter = GitAdapter::new();
    let entry = entry_for(temp_dir.path(), &[]);
    adapter.checkout(
        &entry,
        &CheckoutParams {
            commit: Some(second.to_string()),
            branch: Some("feature".to_string()),
        },
        &NullProgress,
    )?;

    // Both targets were given; the commit wins and HEAD is detached at it.
    assert!(repo.head_detached()?);
    assert_eq!(repo.head()?.peel_to_commit()?.id(), second);
    Ok(())
}

#[test]
fn test_push_to_local_bare_remote() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let bare_path = temp_dir.path().join("remote.git");
    let bare = git2::Repository::init_bare(&bare_path)?;

    let work_path = temp_dir.path().join("work");
    let repo = init_repo(&work_path)?;
    commit_file(&repo, "a.txt", "alpha", "first")?;
    repo.remote("origin", bare_path.to_str().unwrap())?;

    let adapter = GitAdapter::new();
    let entry = entry_for(&work_path, &["origin"]);
    adapter.push(
        &entry,
        &PushParams {
            remote: "origin".to_string(),
            force: false,
            push_all: false,
        },
        &NullProgress,
    )?;

    let refname = repo.head()?.name().unwrap().to_string();
    let pushed = bare.find_reference(&refname)?;
    assert_eq!(pushed.target(), repo.head()?.target());
    Ok(())
}

#[test]
fn test_pull_fast_forwards_a_clone() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let bare_path = temp_dir.path().join("remote.git");
    git2::Repository::init_bare(&bare_path)?;

    // Upstream repository with one commit, pushed to the bare remote.
    let upstream_path = temp_dir.path().join("upstream");
    let upstream = init_repo(&upstream_path)?;
    commit_file(&upstream, "a.txt", "v1", "first")?;
    upstream.remote("origin", bare_path.to_str().unwrap())?;

    let adapter = GitAdapter::new();
    let push_params = PushParams {
        remote: "origin".to_string(),
        force: false,
        push_all: false,
    };
    adapter.push(&entry_for(&upstream_path, &["origin"]), &push_params, &NullProgress)?;

    // Clone it, then advance upstream by one more commit.
    let clone_path = temp_dir.path().join("clone");
    let clone = git2::Repository::clone(bare_path.to_str().unwrap(), &clone_path)?;
    let tip = commit_file(&upstream, "a.txt", "v2", "second")?;
    adapter.push(&entry_for(&upstream_path, &["origin"]), &push_params, &NullProgress)?;

    adapter.pull(
        &entry_for(&clone_path, &["origin"]),
        &PullParams {
            remote: "origin".to_string(),
            force: false,
        },
        &NullProgress,
    )?;

    assert_eq!(clone.head()?.peel_to_commit()?.id(), tip);
    assert_eq!(fs::read_to_string(clone_path.join("a.txt"))?, "v2");
    Ok(())
}

#[test]
fn test_pull_when_up_to_date_is_a_no_op() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let bare_path = temp_dir.path().join("remote.git");
    git2::Repository::init_bare(&bare_path)?;

    let upstream_path = temp_dir.path().join("upstream");
    let upstream = init_repo(&upstream_path)?;
    let tip = commit_file(&upstream, "a.txt", "v1", "first")?;
    upstream.remote("origin", bare_path.to_str().unwrap())?;

    let adapter = GitAdapter::new();
    adapter.push(
        &entry_for(&upstream_path, &["origin"]),
        &PushParams {
            remote: "origin".to_string(),
            force: false,
            push_all: false,
        },
        &NullProgress,
    )?;

    let clone_path = temp_dir.path().join("clone");
    let clone = git2::Repository::clone(bare_path.to_str().unwrap(), &clone_path)?;

    let progress = CollectingProgress::default();
    adapter.pull(
        &entry_for(&clone_path, &["origin"]),
        &PullParams {
            remote: "origin".to_string(),
            force: false,
        },
        &progress,
    )?;

    assert_eq!(clone.head()?.peel_to_commit()?.id(), tip);
    let updates = progress.updates.lock().unwrap();
    assert!(updates.iter().any(|(stage, _)| stage == "Already up to date"));
    Ok(())
}

#[test]
fn test_push_all_pushes_every_local_branch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let bare_path = temp_dir.path().join("remote.git");
    let bare = git2::Repository::init_bare(&bare_path)?;

    let work_path = temp_dir.path().join("work");
    let repo = init_repo(&work_path)?;
    let first = commit_file(&repo, "a.txt", "alpha", "first")?;
    repo.branch("feature", &repo.find_commit(first)?, false)?;
    repo.remote("origin", bare_path.to_str().unwrap())?;

    let adapter = GitAdapter::new();
    adapter.push(
        &entry_for(&work_path, &["origin"]),
        &PushParams {
            remote: "origin".to_string(),
            force: false,
            push_all: true,
        },
        &NullProgress,
    )?;

    assert!(bare.find_reference("refs/heads/feature").is_ok());
    assert_eq!(
        bare.find_reference("refs/heads/feature")?.target(),
        Some(first)
    );
    Ok(())
}
