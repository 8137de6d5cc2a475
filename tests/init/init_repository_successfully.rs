use crate::common::command::{METADATA_DIR, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    let dir_absolute_path = dir.path().canonicalize()?.display().to_string();

    run_twig_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty twig repository in",
        ))
        .stdout(predicate::str::contains(dir_absolute_path));

    let metadata = dir.path().join(METADATA_DIR);
    assert_eq!(
        std::fs::read_to_string(metadata.join("HEAD"))?,
        "ref: refs/heads/master"
    );
    assert!(metadata.join("index").is_file());
    assert!(metadata.join("objects").join("blobs").is_dir());
    assert!(metadata.join("objects").join("commits").is_dir());

    let master_head = std::fs::read_to_string(metadata.join("refs").join("heads").join("master"))?;
    assert_eq!(master_head.len(), 40);
    assert!(master_head.chars().all(|c| c.is_ascii_hexdigit()));

    run_twig_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(format!(
            "===\ncommit {master_head}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"
        ));

    Ok(())
}

#[rstest]
fn initial_commit_is_shared_by_every_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let other_dir = TempDir::new()?;

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    run_twig_command(other_dir.path(), &["init"])
        .assert()
        .success();

    let read_master = |dir: &TempDir| {
        std::fs::read_to_string(
            dir.path()
                .join(METADATA_DIR)
                .join("refs")
                .join("heads")
                .join("master"),
        )
    };

    assert_eq!(read_master(&repository_dir)?, read_master(&other_dir)?);

    Ok(())
}
