use crate::common::command::{open_repository, repository_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use myvcs::artifacts::objects::object_id::ObjectId;
use myvcs::commands::porcelain::checkout::CheckoutOutcome;
use myvcs::commands::porcelain::merge::MergeOutcome;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn staged_path(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().to_string()
}

#[rstest]
fn commit_history_from_hello_to_world(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, output) = open_repository(repository_dir.path());
    repository.init()?;

    let file = repository_dir.path().join("f.txt");
    write_file(FileSpec::new(file.clone(), "hello".to_string()));
    repository.add(&[staged_path(repository_dir.path(), "f.txt")])?;
    let first = repository.commit("first")?;

    assert_eq!(repository.refs().read_head()?, Some(first.clone()));
    assert!(repository.load_index()?.is_empty());

    let history = repository
        .history(None)?
        .collect::<anyhow::Result<Vec<_>>>()?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].0, first);
    assert_eq!(history[0].1.message(), "first");
    assert_eq!(history[0].1.parent(), None);

    write_file(FileSpec::new(file, "world".to_string()));
    repository.add(&[staged_path(repository_dir.path(), "f.txt")])?;
    let second = repository.commit("second")?;

    let history = repository
        .history(None)?
        .collect::<anyhow::Result<Vec<_>>>()?;
    let oids = history.iter().map(|(oid, _)| oid.clone()).collect::<Vec<_>>();
    assert_eq!(oids, vec![second.clone(), first.clone()]);
    assert_eq!(history[0].1.parent(), Some(&first));
    assert_eq!(history[1].1.parent(), None);
    assert_eq!(
        history[0].1.file(Path::new("f.txt")).map(|data| data.to_vec()),
        Some(b"world".to_vec())
    );

    assert!(output.contents().contains("(root-commit)"));

    Ok(())
}

#[rstest]
fn history_of_n_commits_walks_every_parent(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, _) = open_repository(repository_dir.path());
    repository.init()?;

    let mut created = Vec::<ObjectId>::new();
    for i in 0..5 {
        write_file(FileSpec::new(
            repository_dir.path().join("counter.txt"),
            i.to_string(),
        ));
        repository.add(&[staged_path(repository_dir.path(), "counter.txt")])?;
        created.push(repository.commit(&format!("commit {i}"))?);
    }

    let history = repository
        .history(None)?
        .collect::<anyhow::Result<Vec<_>>>()?;
    assert_eq!(history.len(), 5);

    created.reverse();
    for (position, (oid, commit)) in history.iter().enumerate() {
        assert_eq!(oid, &created[position]);
        assert_eq!(commit.parent(), created.get(position + 1));
    }

    Ok(())
}

#[rstest]
fn branch_then_checkout_with_clean_tree(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, _) = open_repository(repository_dir.path());
    repository.init()?;

    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "hello".to_string(),
    ));
    repository.add(&[staged_path(repository_dir.path(), "f.txt")])?;
    let tip = repository.commit("first")?;

    assert_eq!(repository.branch("feature")?, tip);
    assert_eq!(repository.checkout("feature")?, CheckoutOutcome::Switched);
    assert_eq!(repository.refs().current_branch()?.as_ref(), "feature");
    assert_eq!(repository.checkout("feature")?, CheckoutOutcome::AlreadyOn);

    assert_eq!(repository.merge("master")?, MergeOutcome::AlreadyUpToDate);

    Ok(())
}

#[rstest]
fn merge_with_a_different_tip_leaves_state_alone(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, _) = open_repository(repository_dir.path());
    repository.init()?;

    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "hello".to_string(),
    ));
    repository.add(&[staged_path(repository_dir.path(), "f.txt")])?;
    let base = repository.commit("base")?;
    repository.branch("feature")?;

    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "master only".to_string(),
    ));
    repository.add(&[staged_path(repository_dir.path(), "f.txt")])?;
    let master_tip = repository.commit("master work")?;

    assert_eq!(repository.merge("feature")?, MergeOutcome::Completed);

    let master = repository.refs().current_branch()?;
    assert_eq!(repository.refs().tip_of(&master)?, Some(master_tip));
    let feature = myvcs::artifacts::branch::branch_name::BranchName::try_parse(
        "feature".to_string(),
    )?;
    assert_eq!(repository.refs().tip_of(&feature)?, Some(base));
    assert!(repository.load_index()?.is_empty());
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("f.txt"))?,
        "master only"
    );

    Ok(())
}
