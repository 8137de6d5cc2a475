use crate::common::command::{
    get_branch_head, init_repository_dir, run_twig_command, stage_and_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn find_commits_by_message(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let first = get_branch_head(dir.path(), "master")?;

    write_file(FileSpec::new(dir.path().join("1.txt"), "again".to_string()));
    stage_and_commit(dir.path(), "Initial files");
    let second = get_branch_head(dir.path(), "master")?;

    let mut expected = vec![first, second];
    expected.sort();

    run_twig_command(dir.path(), &["find", "Initial files"])
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", expected[0], expected[1]));

    run_twig_command(dir.path(), &["find", "initial commit"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?);

    Ok(())
}

#[rstest]
fn find_without_matches_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["find", "Initial"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Found no commit with that message."));
}
