use crate::common::command::{init_repository_dir, read_head, read_ref, run_myvcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let tip = read_ref(repository_dir.path(), "master");

    run_myvcs_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_myvcs_command(repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq("Switched to branch 'feature'\n"));

    assert_eq!(read_head(repository_dir.path()), "feature");
    assert_eq!(read_ref(repository_dir.path(), "feature"), tip);
    assert_eq!(std::fs::read_to_string(repository_dir.path().join("1.txt"))?, "one");

    Ok(())
}

#[rstest]
fn checkout_current_branch_is_a_notice(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // even with local changes, staying on the same branch is never refused
    std::fs::write(repository_dir.path().join("1.txt"), "edited")?;

    run_myvcs_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::eq("Already on 'master'\n"));

    assert_eq!(read_head(repository_dir.path()), "master");

    Ok(())
}

#[rstest]
#[case("missing")]
#[case("bad..name")]
fn checkout_missing_branch_fails(
    init_repository_dir: TempDir,
    #[case] target: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_myvcs_command(repository_dir.path(), &["checkout", target])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(format!("branch '{target}' not found")));

    assert_eq!(read_head(repository_dir.path()), "master");

    Ok(())
}
