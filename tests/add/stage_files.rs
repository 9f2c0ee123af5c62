use crate::common::command::{open_repository, repository_dir, run_myvcs_command};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use myvcs::artifacts::objects::content_hasher::hash_bytes;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

#[rstest]
fn stage_single_file(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_myvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "hello".to_string(),
    ));

    run_myvcs_command(repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("Staged f.txt\n"));

    let (repository, _) = open_repository(repository_dir.path());
    let index = repository.load_index()?;
    assert_eq!(index.len(), 1);
    assert_eq!(
        index.entry_by_path(Path::new("f.txt")),
        Some(&hash_bytes(b"hello"))
    );

    Ok(())
}

#[rstest]
fn stage_directory_expands_to_non_hidden_files(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_myvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let nested = repository_dir.path().join("src").join("nested");
    let mut expected = write_generated_files(&nested, 3)
        .into_iter()
        .map(|spec| {
            spec.path
                .strip_prefix(repository_dir.path())
                .map(|p| p.to_path_buf())
        })
        .collect::<Result<Vec<_>, _>>()?;
    expected.push(Path::new("src").join("top.txt"));
    expected.sort();

    write_file(FileSpec::new(
        repository_dir.path().join("src").join("top.txt"),
        "top".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("src").join(".secret"),
        "hidden".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("src").join(".cache").join("blob"),
        "hidden".to_string(),
    ));

    run_myvcs_command(repository_dir.path(), &["add", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged src/top.txt"))
        .stdout(predicate::str::contains(".secret").not())
        .stdout(predicate::str::contains(".cache").not());

    let (repository, _) = open_repository(repository_dir.path());
    let index = repository.load_index()?;
    let staged = index.paths().cloned().collect::<Vec<_>>();
    assert_eq!(staged, expected);

    Ok(())
}

#[rstest]
fn staging_the_same_file_twice_is_idempotent(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_myvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "hello".to_string(),
    ));
    let index_path = repository_dir.path().join(".myvcs").join("index");

    run_myvcs_command(repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    let first = std::fs::read(&index_path)?;

    run_myvcs_command(repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    let second = std::fs::read(&index_path)?;

    assert_eq!(first, second);

    Ok(())
}

#[rstest]
fn restaging_a_modified_file_updates_its_hash(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_myvcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let file = repository_dir.path().join("f.txt");
    write_file(FileSpec::new(file.clone(), "hello".to_string()));
    run_myvcs_command(repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(file, "world".to_string()));
    run_myvcs_command(repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success();

    let (repository, _) = open_repository(repository_dir.path());
    let index = repository.load_index()?;
    assert_eq!(index.len(), 1);
    assert_eq!(
        index.entry_by_path(Path::new("f.txt")),
        Some(&hash_bytes(b"world"))
    );

    Ok(())
}
