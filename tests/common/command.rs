use crate::common::file::{FileSpec, write_file};
use crate::common::{COMMIT_DATE, SharedBuffer};
use assert_cmd::Command;
use assert_fs::TempDir;
use myvcs::Repository;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit on `master` holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_myvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_myvcs_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    myvcs_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_myvcs_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("myvcs").expect("Failed to find myvcs binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn myvcs_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_myvcs_command(dir, &["commit", "-m", message]);
    cmd.env("MYVCS_COMMIT_DATE", COMMIT_DATE);
    cmd
}

/// Stage `paths` and commit them, returning the new tip of the current branch
pub fn stage_and_commit(dir: &Path, paths: &[&str], message: &str) -> String {
    let mut args = vec!["add"];
    args.extend_from_slice(paths);
    run_myvcs_command(dir, &args).assert().success();
    myvcs_commit(dir, message).assert().success();

    read_ref(dir, &read_head(dir))
}

pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".myvcs").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

pub fn read_ref(dir: &Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".myvcs").join("refs").join(branch))
        .unwrap_or_else(|e| panic!("Failed to read ref {}: {}", branch, e))
        .trim()
        .to_string()
}

/// Open a repository handle writing into an in-memory buffer
pub fn open_repository(dir: &Path) -> (Repository, SharedBuffer) {
    colored::control::set_override(false);

    let buffer = SharedBuffer::default();
    let repository = Repository::new(&dir.to_string_lossy(), Box::new(buffer.clone()))
        .expect("Failed to open repository");

    (repository, buffer)
}
