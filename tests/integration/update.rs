use crate::common::TestRepo;
use predicates::prelude::*;

#[test]
fn test_checkout_switches_branch() {
    let repo = TestRepo::configured();

    repo.scmws()
        .args(["checkout", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked out 0.1"));

    repo.scmws()
        .arg("current-branch")
        .assert()
        .success()
        .stdout("0.1\n");

    assert_eq!(repo.workspace_rev("HEAD"), repo.origin_rev("0.1"));
}

#[test]
fn test_checkout_twice_is_stable() {
    let repo = TestRepo::configured();

    repo.scmws().args(["checkout", "develop"]).assert().success();
    let first = repo.workspace_rev("HEAD");

    repo.scmws().args(["checkout", "develop"]).assert().success();
    assert_eq!(repo.workspace_rev("HEAD"), first);
    assert_eq!(first, repo.origin_rev("develop"));

    repo.scmws()
        .arg("current-branch")
        .assert()
        .success()
        .stdout("develop\n");
}

#[test]
fn test_checkout_unknown_branch_fails() {
    let repo = TestRepo::configured();

    repo.scmws()
        .args(["checkout", "no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Command failed: git checkout no-such-branch"));

    repo.scmws()
        .arg("current-branch")
        .assert()
        .success()
        .stdout("develop\n");
}

#[test]
fn test_move_resets_to_tag() {
    let repo = TestRepo::configured();

    repo.scmws()
        .args(["move", "v0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to v0.0.1"));

    assert_eq!(repo.workspace_rev("HEAD"), repo.origin_rev("v0.0.1"));

    repo.scmws()
        .arg("current-tags")
        .assert()
        .success()
        .stdout("v0.0.1\n");

    // The branch itself stays checked out
    repo.scmws()
        .arg("current-branch")
        .assert()
        .success()
        .stdout("develop\n");
}

#[test]
fn test_reset_hard_alias() {
    let repo = TestRepo::configured();

    repo.scmws().args(["reset-hard", "v0.0.2"]).assert().success();

    assert_eq!(repo.workspace_rev("HEAD"), repo.origin_rev("v0.0.2"));
}

#[test]
fn test_checkout_restores_remote_tip_after_move() {
    let repo = TestRepo::configured();

    repo.scmws().args(["move", "v0.0.1"]).assert().success();
    repo.scmws().args(["checkout", "develop"]).assert().success();

    assert_eq!(repo.workspace_rev("HEAD"), repo.origin_rev("develop"));
}

#[test]
fn test_status_up_to_date() {
    let repo = TestRepo::configured();

    repo.scmws()
        .arg("status")
        .assert()
        .success()
        .stdout("everything is up-to-dated.\n");
}

#[test]
fn test_status_after_move_reports_lag() {
    let repo = TestRepo::configured();

    repo.scmws().args(["move", "v0.0.1"]).assert().success();

    repo.scmws()
        .arg("status")
        .assert()
        .success()
        .stdout("There is/are 1 commit\n");
}

#[test]
fn test_fetch_then_status_reports_new_commits() {
    let repo = TestRepo::configured();
    repo.push_commits("develop", 2);

    // Nothing is known before fetching
    repo.scmws()
        .arg("status")
        .assert()
        .success()
        .stdout("everything is up-to-dated.\n");

    repo.scmws()
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched"));

    repo.scmws()
        .arg("status")
        .assert()
        .success()
        .stdout("There is/are 2 commits\n");

    repo.scmws().args(["checkout", "develop"]).assert().success();
    assert_eq!(repo.workspace_rev("HEAD"), repo.origin_rev("develop"));

    repo.scmws()
        .arg("status")
        .assert()
        .success()
        .stdout("everything is up-to-dated.\n");
}

#[test]
fn test_mutations_on_unconfigured_workspace_fail() {
    let repo = TestRepo::new();

    for args in [
        vec!["checkout", "develop"],
        vec!["move", "v0.0.1"],
        vec!["fetch"],
    ] {
        repo.scmws()
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Workspace is not configured"));
    }
}
