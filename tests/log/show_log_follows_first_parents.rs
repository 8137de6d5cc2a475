use crate::common::command::{
    get_branch_head, init_repository_dir, log_commit_ids, run_twig_command, stage_and_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_log_follows_first_parents(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let base = get_branch_head(dir.path(), "master")?;

    run_twig_command(dir.path(), &["branch", "create", "side"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("1.txt"), "master".to_string()));
    stage_and_commit(dir.path(), "master work");
    let master_head = get_branch_head(dir.path(), "master")?;

    run_twig_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("side.txt"), "side".to_string()));
    stage_and_commit(dir.path(), "side work");
    let side_head = get_branch_head(dir.path(), "side")?;

    let ids = log_commit_ids(dir.path())?;
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], side_head);
    assert_eq!(ids[1], base);

    run_twig_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    let ids = log_commit_ids(dir.path())?;
    assert_eq!(ids[..2], [master_head, base]);
    assert!(!ids.contains(&side_head));

    Ok(())
}

#[rstest]
fn show_log_block_format(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    let output = run_twig_command(dir.path(), &["log"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let blocks = stdout
        .split("===\n")
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>();

    assert_eq!(blocks.len(), 2);
    for block in blocks {
        let lines = block.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("commit "));
        assert!(lines[1].starts_with("Date: "));
        assert_eq!(lines.last(), Some(&""));
    }

    Ok(())
}
