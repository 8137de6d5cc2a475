use crate::common::command::{init_repository_dir, run_twig_command, twig_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_deletes_it_and_stages_the_removal(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["rm", "a/b/3.txt"])
        .assert()
        .success()
        .stdout("");

    assert!(!dir.path().join("a").join("b").join("3.txt").exists());
    assert!(!dir.path().join("a").join("b").exists());
    assert!(dir.path().join("a").join("2.txt").is_file());

    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Removed Files ===\na/b/3.txt\n\n",
        ));

    twig_commit(dir.path(), "drop three").assert().success();

    run_twig_command(dir.path(), &["rm", "a/b/3.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No reason to remove the file."));

    Ok(())
}

#[rstest]
fn removing_a_staged_file_unstages_it_and_keeps_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("new.txt"), "new".to_string()));
    run_twig_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();

    run_twig_command(dir.path(), &["rm", "new.txt"])
        .assert()
        .success();

    assert!(dir.path().join("new.txt").is_file());
    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ))
        .stdout(predicate::str::contains("=== Untracked Files ===\nnew.txt\n"));
}

#[rstest]
fn removing_an_untracked_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("loose.txt"), "x".to_string()));

    run_twig_command(dir.path(), &["rm", "loose.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No reason to remove the file."));

    assert!(dir.path().join("loose.txt").is_file());
}
