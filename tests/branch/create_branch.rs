use crate::common::command::{
    METADATA_DIR, get_branch_head, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("feature")]
#[case("feature/login")]
#[case("release-1.0")]
#[case("fix_123")]
fn create_branch_with_valid_name(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", "create", name])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        get_branch_head(dir.path(), name)?,
        get_branch_head(dir.path(), "master")?
    );
    // the active branch does not change
    assert_eq!(
        std::fs::read_to_string(dir.path().join(METADATA_DIR).join("HEAD"))?,
        "ref: refs/heads/master"
    );

    Ok(())
}

#[rstest]
#[case(".hidden")]
#[case("double..dot")]
#[case("trailing/")]
#[case("name.lock")]
#[case("with space")]
#[case("star*")]
#[case("HEAD")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", "create", name])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!("Invalid branch name: {name}")));
}

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", "create", "topic"])
        .assert()
        .success();

    run_twig_command(dir.path(), &["branch", "create", "topic"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));

    run_twig_command(dir.path(), &["branch", "create", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}
