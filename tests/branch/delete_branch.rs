use crate::common::command::{
    get_branch_head, init_repository_dir, run_twig_command, stage_and_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn delete_branch_keeps_its_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", "create", "topic/work"])
        .assert()
        .success();
    run_twig_command(dir.path(), &["checkout", "topic/work"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("topic.txt"), "t".to_string()));
    stage_and_commit(dir.path(), "topic commit");
    let topic_head = get_branch_head(dir.path(), "topic/work")?;

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_twig_command(dir.path(), &["branch", "delete", "topic/work"])
        .assert()
        .success()
        .stdout("");

    run_twig_command(dir.path(), &["branch", "list"])
        .assert()
        .success()
        .stdout("*master\n");

    run_twig_command(dir.path(), &["find", "topic commit"])
        .assert()
        .success()
        .stdout(format!("{topic_head}\n"));

    Ok(())
}

#[rstest]
#[case("master", "Cannot remove the current branch.")]
#[case("missing", "A branch with that name does not exist.")]
fn delete_branch_failures(
    init_repository_dir: TempDir,
    #[case] name: &str,
    #[case] message: &str,
) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", "delete", name])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(message));
}
