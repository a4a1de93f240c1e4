//! Integration tests for the sync engine.
//!
//! These tests use real git repositories created via tempfile and drive the
//! full engine with a mock gateway. Pushes go to local bare repositories by
//! overriding the host base URL, so nothing leaves the machine.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use orgsync::core::{PushOutcome, RepoOutcome, SyncSettings};
use orgsync::engine::SyncEngine;
use orgsync::forge::mock::{MockGateway, MockOperation};
use orgsync::git::{Git, PushCredentials};
use orgsync::ui::Verbosity;

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Run a git command and return its trimmed stdout.
fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Test fixture: a scan root containing source repositories, and a mirror
/// directory standing in for the hosting service's push endpoint.
struct SyncFixture {
    root: TempDir,
    mirror: TempDir,
}

impl SyncFixture {
    fn new() -> Self {
        Self {
            root: TempDir::new().expect("create scan root"),
            mirror: TempDir::new().expect("create mirror dir"),
        }
    }

    /// Create a working-copy repository with one commit, returning its path.
    fn add_repo(&self, name: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::create_dir_all(&path).unwrap();
        run_git(&path, &["init", "-b", "main"]);
        run_git(&path, &["config", "user.email", "test@example.com"]);
        run_git(&path, &["config", "user.name", "Test User"]);
        std::fs::write(path.join("README.md"), format!("# {}\n", name)).unwrap();
        run_git(&path, &["add", "README.md"]);
        run_git(&path, &["commit", "-m", "Initial commit"]);
        path
    }

    /// Create the bare repository a push for `org/name` lands in.
    fn add_push_target(&self, org: &str, name: &str) -> PathBuf {
        let path = self.mirror.path().join(org).join(format!("{}.git", name));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        run_git(path.parent().unwrap(), &["init", "--bare", path.to_str().unwrap()]);
        path
    }

    fn settings(&self, org: &str) -> SyncSettings {
        SyncSettings::new(self.root.path(), org, "deploy-bot", "https://github.com")
            .with_host(self.mirror.path().to_str().unwrap())
    }

    fn engine(&self, org: &str, gateway: MockGateway) -> SyncEngine {
        SyncEngine::new(
            self.settings(org),
            Box::new(gateway),
            PushCredentials {
                username: "deploy-bot".to_string(),
                secret: "token".to_string(),
            },
            Verbosity::Quiet,
        )
    }
}

#[tokio::test]
async fn end_to_end_single_repository() {
    let fixture = SyncFixture::new();
    let repo = fixture.add_repo("widget");
    let target = fixture.add_push_target("acme", "widget");
    let commit = git_stdout(&repo, &["rev-parse", "refs/heads/main"]);

    let gateway = MockGateway::new();
    let outcome = fixture.engine("acme", gateway.clone()).run().await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.reports.len(), 1);
    let report = &outcome.reports[0];
    assert_eq!(report.name.as_deref(), Some("widget"));
    assert_eq!(
        report.outcome,
        RepoOutcome::Pushed {
            branches: PushOutcome::Succeeded { pushed: 1 },
            tags: PushOutcome::Succeeded { pushed: 0 },
        }
    );

    // The hosted repository was looked up, then created.
    assert_eq!(
        gateway.operations(),
        vec![
            MockOperation::GetRepo {
                org: "acme".to_string(),
                name: "widget".to_string()
            },
            MockOperation::CreateRepo {
                org: "acme".to_string(),
                name: "widget".to_string()
            },
        ]
    );

    // Exactly one remote, under the fixed name, at the constructed URL.
    let git = Git::open(&repo).unwrap();
    let remotes = git.remotes().unwrap();
    assert_eq!(remotes.len(), 1);
    assert_eq!(remotes[0].name, "github");
    assert_eq!(
        remotes[0].url,
        format!("{}/acme/widget.git", fixture.mirror.path().display())
    );

    // Tracking ref at the branch tip, and the push landed.
    assert_eq!(
        git_stdout(&repo, &["rev-parse", "refs/remotes/github/main"]),
        commit
    );
    assert_eq!(git_stdout(&target, &["rev-parse", "refs/heads/main"]), commit);
}

#[tokio::test]
async fn tracking_refs_cover_every_local_branch() {
    let fixture = SyncFixture::new();
    let repo = fixture.add_repo("widget");
    fixture.add_push_target("acme", "widget");
    run_git(&repo, &["branch", "feature/x"]);
    run_git(&repo, &["branch", "release"]);

    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();
    assert!(outcome.is_success());

    for branch in ["main", "feature/x", "release"] {
        let tip = git_stdout(&repo, &["rev-parse", &format!("refs/heads/{}", branch)]);
        let tracked = git_stdout(
            &repo,
            &["rev-parse", &format!("refs/remotes/github/{}", branch)],
        );
        assert_eq!(tracked, tip, "tracking ref for {}", branch);

        // Upstream metadata points back at the tracking ref.
        assert_eq!(
            git_stdout(&repo, &["config", &format!("branch.{}.remote", branch)]),
            "github"
        );
        assert_eq!(
            git_stdout(&repo, &["config", &format!("branch.{}.merge", branch)]),
            format!("refs/heads/{}", branch)
        );
    }
}

#[tokio::test]
async fn force_push_overwrites_diverged_remote_history() {
    let fixture = SyncFixture::new();
    let repo = fixture.add_repo("widget");
    let target = fixture.add_push_target("acme", "widget");

    // First sync establishes remote history.
    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();
    assert!(outcome.is_success());

    // Rewrite local history so the remote is no longer an ancestor.
    run_git(&repo, &["commit", "--amend", "-m", "Rewritten initial commit"]);
    let rewritten = git_stdout(&repo, &["rev-parse", "refs/heads/main"]);

    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();
    assert!(outcome.is_success());
    assert_eq!(
        git_stdout(&target, &["rev-parse", "refs/heads/main"]),
        rewritten
    );
}

#[tokio::test]
async fn bad_remote_is_repaired_end_to_end() {
    let fixture = SyncFixture::new();
    let repo = fixture.add_repo("widget");
    fixture.add_push_target("acme", "widget");
    run_git(&repo, &["remote", "add", "github", "https://github.com/stale/widget.git"]);

    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();
    assert!(outcome.is_success());

    let git = Git::open(&repo).unwrap();
    let remotes = git.remotes().unwrap();
    assert_eq!(remotes.len(), 1);
    assert_eq!(remotes[0].name, "github");
    assert_eq!(
        remotes[0].url,
        format!("{}/acme/widget.git", fixture.mirror.path().display())
    );
}

#[tokio::test]
async fn tags_are_pushed_alongside_branches() {
    let fixture = SyncFixture::new();
    let repo = fixture.add_repo("widget");
    let target = fixture.add_push_target("acme", "widget");
    run_git(&repo, &["tag", "v1.0.0"]);
    run_git(&repo, &["tag", "-a", "v1.1.0", "-m", "annotated release"]);

    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();
    assert!(outcome.is_success());
    assert_eq!(
        outcome.reports[0].outcome,
        RepoOutcome::Pushed {
            branches: PushOutcome::Succeeded { pushed: 1 },
            tags: PushOutcome::Succeeded { pushed: 2 },
        }
    );
    assert_eq!(
        git_stdout(&target, &["tag", "--list"]),
        "v1.0.0\nv1.1.0"
    );
}

#[tokio::test]
async fn failing_repository_does_not_block_the_rest() {
    let fixture = SyncFixture::new();
    let alpha = fixture.add_repo("alpha");
    fixture.add_repo("beta");
    let gamma = fixture.add_repo("gamma");
    // No push target for beta: its branch push fails.
    fixture.add_push_target("acme", "alpha");
    fixture.add_push_target("acme", "gamma");

    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();

    assert!(!outcome.is_success());
    assert_eq!(outcome.reports.len(), 3);

    // Discovery order is name order.
    assert_eq!(outcome.reports[0].name.as_deref(), Some("alpha"));
    assert_eq!(outcome.reports[1].name.as_deref(), Some("beta"));
    assert_eq!(outcome.reports[2].name.as_deref(), Some("gamma"));

    assert!(outcome.reports[0].succeeded());
    assert!(!outcome.reports[1].succeeded());
    assert!(outcome.reports[2].succeeded());

    match &outcome.reports[1].outcome {
        RepoOutcome::Pushed { branches, tags } => {
            assert!(matches!(branches, PushOutcome::Failed(_)));
            // No tags exist, so the tag pass trivially succeeds.
            assert_eq!(*tags, PushOutcome::Succeeded { pushed: 0 });
        }
        other => panic!("expected pushed outcome, got {:?}", other),
    }

    // The neighbors were fully processed.
    for repo in [&alpha, &gamma] {
        let tip = git_stdout(repo, &["rev-parse", "refs/heads/main"]);
        assert_eq!(
            git_stdout(repo, &["rev-parse", "refs/remotes/github/main"]),
            tip
        );
    }
}

#[tokio::test]
async fn tag_push_failure_keeps_branch_push_result() {
    let fixture = SyncFixture::new();
    let repo = fixture.add_repo("widget");
    let target = fixture.add_push_target("acme", "widget");
    run_git(&repo, &["tag", "v1"]);

    // Seed the target with a conflicting v1 pointing at unrelated history;
    // the unforced tag push must be rejected while the forced branch push
    // succeeds.
    let scratch = TempDir::new().unwrap();
    run_git(scratch.path(), &["init", "-b", "main"]);
    run_git(scratch.path(), &["config", "user.email", "test@example.com"]);
    run_git(scratch.path(), &["config", "user.name", "Test User"]);
    std::fs::write(scratch.path().join("other.txt"), "other\n").unwrap();
    run_git(scratch.path(), &["add", "other.txt"]);
    run_git(scratch.path(), &["commit", "-m", "Unrelated commit"]);
    run_git(scratch.path(), &["tag", "v1"]);
    run_git(
        scratch.path(),
        &["push", target.to_str().unwrap(), "refs/tags/v1:refs/tags/v1"],
    );

    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();

    assert!(!outcome.is_success());
    match &outcome.reports[0].outcome {
        RepoOutcome::Pushed { branches, tags } => {
            assert_eq!(*branches, PushOutcome::Succeeded { pushed: 1 });
            assert!(matches!(tags, PushOutcome::Failed(_)));
        }
        other => panic!("expected pushed outcome, got {:?}", other),
    }

    // The branch push landed despite the tag rejection.
    let tip = git_stdout(&repo, &["rev-parse", "refs/heads/main"]);
    assert_eq!(git_stdout(&target, &["rev-parse", "refs/heads/main"]), tip);
}

#[tokio::test]
async fn existing_hosted_repository_is_not_recreated() {
    let fixture = SyncFixture::new();
    fixture.add_repo("widget");
    fixture.add_push_target("acme", "widget");

    let gateway = MockGateway::new().with_existing_repo("acme", "widget");
    let outcome = fixture.engine("acme", gateway.clone()).run().await.unwrap();

    assert!(outcome.is_success());
    assert!(gateway.created_repos().is_empty());
}

#[tokio::test]
async fn bare_repository_is_mirrored_under_its_directory_name() {
    let fixture = SyncFixture::new();
    // A bare repository: clone an ordinary one into proj.git.
    let seed = fixture.add_repo("seed");
    let bare = fixture.root.path().join("proj.git");
    run_git(
        fixture.root.path(),
        &["clone", "--bare", seed.to_str().unwrap(), bare.to_str().unwrap()],
    );
    // Remove the seed so only the bare repository remains under the root.
    std::fs::remove_dir_all(&seed).unwrap();
    let target = fixture.add_push_target("acme", "proj.git");

    let gateway = MockGateway::new();
    let outcome = fixture.engine("acme", gateway.clone()).run().await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].name.as_deref(), Some("proj.git"));
    assert_eq!(gateway.created_repos(), vec!["acme/proj.git"]);

    let tip = git_stdout(&bare, &["rev-parse", "refs/heads/main"]);
    assert_eq!(git_stdout(&target, &["rev-parse", "refs/heads/main"]), tip);
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let fixture = SyncFixture::new();
    let repo = fixture.add_repo("widget");
    fixture.add_push_target("acme", "widget");

    let outcome = fixture
        .engine("acme", MockGateway::new())
        .run()
        .await
        .unwrap();
    assert!(outcome.is_success());

    // Second run with the hosted repository now existing: same result, one
    // remote, no create call.
    let gateway = MockGateway::new().with_existing_repo("acme", "widget");
    let outcome = fixture.engine("acme", gateway.clone()).run().await.unwrap();
    assert!(outcome.is_success());
    assert!(gateway.created_repos().is_empty());

    let git = Git::open(&repo).unwrap();
    assert_eq!(git.remotes().unwrap().len(), 1);
}
