use crate::common::command::{repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn adding_a_non_existent_file_fails(repository_dir: TempDir) {
    let dir = repository_dir;
    run_twig_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("real.txt"), "real".to_string()));

    run_twig_command(dir.path(), &["add", "real.txt", "missing.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File does not exist."));

    // nothing was staged, not even the file that exists
    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===",
        ))
        .stdout(predicate::str::contains("=== Untracked Files ===\nreal.txt\n"));
}
