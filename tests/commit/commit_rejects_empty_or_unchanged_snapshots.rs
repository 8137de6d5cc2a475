use crate::common::command::{get_head_commit_sha, init_repository_dir, twig_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n")]
fn commit_with_blank_message_fails(
    init_repository_dir: TempDir,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head_before = get_head_commit_sha(dir.path())?;

    twig_commit(dir.path(), message)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please enter a commit message."));

    assert_eq!(get_head_commit_sha(dir.path())?, head_before);

    Ok(())
}

#[rstest]
fn commit_without_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head_before = get_head_commit_sha(dir.path())?;

    // working tree changes alone are not committed
    write_file(FileSpec::new(dir.path().join("1.txt"), "changed".to_string()));

    twig_commit(dir.path(), "unstaged only")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No changes added to the commit."));

    assert_eq!(get_head_commit_sha(dir.path())?, head_before);

    Ok(())
}
