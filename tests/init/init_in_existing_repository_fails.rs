use crate::common::command::{init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_in_existing_repository_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A twig version-control system already exists in the current directory.",
        ));

    // the existing history is untouched
    run_twig_command(dir.path(), &["find", "Initial files"])
        .assert()
        .success();
}
