use crate::common::command::{
    get_branch_head, init_repository_dir, run_twig_command, stage_and_commit, twig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_with_conflicts(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_twig_command(dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("1.txt"), "master\n".to_string()));
    write_file(FileSpec::new(dir.path().join("a").join("2.txt"), "two, master\n".to_string()));
    stage_and_commit(dir.path(), "master edits");
    let master_head = get_branch_head(dir.path(), "master")?;

    run_twig_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("1.txt"), "feature\n".to_string()));
    run_twig_command(dir.path(), &["rm", "a/2.txt"])
        .assert()
        .success();
    // both sides add the same content: no conflict
    write_file(FileSpec::new(dir.path().join("same.txt"), "same".to_string()));
    stage_and_commit(dir.path(), "feature edits");

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("same.txt"), "same".to_string()));
    stage_and_commit(dir.path(), "same file on master");

    twig_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.path().join("1.txt")),
        "<<<<<<< HEAD\nmaster\n=======\nfeature\n>>>>>>>\n"
    );
    assert_eq!(
        read_file(&dir.path().join("a").join("2.txt")),
        "<<<<<<< HEAD\ntwo, master\n=======\n>>>>>>>\n"
    );
    assert_eq!(read_file(&dir.path().join("same.txt")), "same");

    // the conflicted snapshot is committed as the merge
    assert_ne!(get_branch_head(dir.path(), "master")?, master_head);
    run_twig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n=== Modifications Not Staged For Commit ===\n\n",
        ));
    run_twig_command(dir.path(), &["find", "Merged feature into master."])
        .assert()
        .success();

    Ok(())
}
