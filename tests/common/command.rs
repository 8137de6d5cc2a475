use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const METADATA_DIR: &str = ".twig";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_twig_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    twig_commit(repository_dir.path(), "Initial files")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    run_twig_command(dir, &["commit", "-m", message])
}

/// Commit with a fixed timestamp (`%Y-%m-%d %H:%M:%S %z`)
pub fn twig_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = twig_commit(dir, message);
    cmd.envs(vec![("TWIG_COMMIT_DATE", date)]);
    cmd
}

pub fn twig_merge(dir: &Path, branch: &str) -> Command {
    run_twig_command(dir, &["merge", branch])
}

/// Stage everything and commit it
pub fn stage_and_commit(dir: &Path, message: &str) {
    run_twig_command(dir, &["add", "."]).assert().success();
    twig_commit(dir, message).assert().success();
}

/// The commit ID the given branch points to
pub fn get_branch_head(dir: &Path, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
    let ref_path = dir
        .join(METADATA_DIR)
        .join("refs")
        .join("heads")
        .join(branch);
    Ok(std::fs::read_to_string(ref_path)?.trim().to_string())
}

/// The commit ID HEAD resolves to, through the active branch
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(METADATA_DIR).join("HEAD"))?;
    let branch = head_content
        .trim()
        .strip_prefix("ref: refs/heads/")
        .ok_or("HEAD does not name a branch")?;

    get_branch_head(dir, branch)
}

/// Commit IDs printed by `log`, newest first
pub fn log_commit_ids(dir: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let output = run_twig_command(dir, &["log"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    Ok(stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect())
}
