use crate::common::command::{init_repository_dir, run_twig_command, twig_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn adding_an_unchanged_file_stages_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    twig_commit(dir.path(), "nothing new")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn restoring_committed_contents_unstages_a_change(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("1.txt"), "changed".to_string()));
    run_twig_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("1.txt"), "one".to_string()));
    run_twig_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===",
        ));
}
