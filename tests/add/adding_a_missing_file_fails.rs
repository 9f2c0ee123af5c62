use crate::common::command::{open_repository, repository_dir, run_myvcs_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_myvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_myvcs_command(repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file missing.txt does not exist"));

    Ok(())
}

#[rstest]
fn a_missing_path_stages_nothing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_myvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("present.txt"),
        "here".to_string(),
    ));

    run_myvcs_command(repository_dir.path(), &["add", "present.txt", "missing.txt"])
        .assert()
        .failure();

    let (repository, _) = open_repository(repository_dir.path());
    assert!(repository.load_index()?.is_empty());

    Ok(())
}
