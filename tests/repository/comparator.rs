use crate::common::command::{open_repository, repository_dir};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use myvcs::artifacts::status::file_change::{ChangeSource, ChangeType};
use myvcs::artifacts::status::inspector::Inspector;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};

fn committed_repository(dir: &Path) -> anyhow::Result<myvcs::Repository> {
    let (repository, _) = open_repository(dir);
    repository.init()?;

    for (name, content) in [("keep.txt", "keep"), ("edit.txt", "edit"), ("drop.txt", "drop")] {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
    }
    repository.add(&[dir.to_string_lossy().to_string()])?;
    repository.commit("baseline")?;

    Ok(repository)
}

#[rstest]
fn clean_tree_has_no_uncommitted_changes(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository = committed_repository(repository_dir.path())?;

    assert!(!repository.inspector().has_uncommitted_changes()?);
    assert_eq!(repository.inspector().first_divergence()?, None);
    assert!(repository.inspector().divergences()?.is_empty());

    Ok(())
}

#[rstest]
fn tracked_changes_are_found_before_untracked_files(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository = committed_repository(repository_dir.path())?;

    write_file(FileSpec::new(
        repository_dir.path().join("aaa-untracked.txt"),
        "new".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("edit.txt"),
        "edited".to_string(),
    ));
    delete_path(&repository_dir.path().join("drop.txt"));

    let first = repository
        .inspector()
        .first_divergence()?
        .expect("the tree has changes");
    assert_eq!(first.path, PathBuf::from("drop.txt"));
    assert_eq!(first.change, ChangeType::Deleted);
    assert_eq!(first.source, ChangeSource::LastCommit);

    let all = repository
        .inspector()
        .divergences()?
        .into_iter()
        .map(|d| (d.path, d.change))
        .collect::<Vec<_>>();
    assert_eq!(
        all,
        vec![
            (PathBuf::from("drop.txt"), ChangeType::Deleted),
            (PathBuf::from("edit.txt"), ChangeType::Modified),
            (PathBuf::from("aaa-untracked.txt"), ChangeType::Untracked),
        ]
    );

    Ok(())
}

#[rstest]
fn staged_but_uncommitted_file_is_tracked(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository = committed_repository(repository_dir.path())?;

    let staged = repository_dir.path().join("staged.txt");
    write_file(FileSpec::new(staged.clone(), "v1".to_string()));
    repository.add(&[staged.to_string_lossy().to_string()])?;

    // staged and unchanged since: nothing diverges
    assert!(!repository.inspector().has_uncommitted_changes()?);

    delete_path(&staged);
    let first = repository
        .inspector()
        .first_divergence()?
        .expect("staged file was deleted");
    assert_eq!(first.change, ChangeType::Deleted);
    assert_eq!(first.source, ChangeSource::Index);

    Ok(())
}

#[rstest]
fn skip_rule_is_configurable(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository = committed_repository(repository_dir.path())?;

    write_file(FileSpec::new(
        repository_dir.path().join("scratch").join("notes.txt"),
        "scratch".to_string(),
    ));
    assert!(repository.inspector().has_uncommitted_changes()?);

    let inspector = Inspector::new(&repository, |path: &Path| {
        myvcs::areas::repository::skip_hidden_and_control(path) || path.starts_with("scratch")
    });
    assert!(!inspector.has_uncommitted_changes()?);

    Ok(())
}
