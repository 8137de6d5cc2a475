use crate::common::command::{get_branch_head, init_repository_dir, run_twig_command, stage_and_commit};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_file_from_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("1.txt"), "scratch".to_string()));
    std::fs::remove_file(dir.path().join("a").join("2.txt")).unwrap();

    run_twig_command(dir.path(), &["checkout", "--", "1.txt", "a/2.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.path().join("1.txt")), "one");
    assert_eq!(read_file(&dir.path().join("a").join("2.txt")), "two");
}

#[rstest]
#[case(8)]
#[case(40)]
fn checkout_file_from_older_commit(
    init_repository_dir: TempDir,
    #[case] id_length: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let old_commit = get_branch_head(dir.path(), "master")?;

    write_file(FileSpec::new(dir.path().join("1.txt"), "version two".to_string()));
    stage_and_commit(dir.path(), "second version");

    run_twig_command(dir.path(), &["checkout", &old_commit[..id_length], "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join("1.txt")), "one");

    // restored files are not staged
    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===",
        ))
        .stdout(predicate::str::contains("1.txt (modified)"));

    Ok(())
}

#[rstest]
fn checkout_file_missing_from_commit_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["checkout", "--", "nope.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
#[case("0000000000")]
#[case("not-a-commit")]
fn checkout_file_from_unknown_commit_fails(init_repository_dir: TempDir, #[case] commit: &str) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["checkout", commit, "--", "1.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No commit with that id exists."));
}
