use crate::common::command::{repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories_to_index_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_twig_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("top.txt"), "top".to_string()));
    write_file(FileSpec::new(
        dir.path().join("src").join("lib").join("deep.txt"),
        "deep".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("src").join("shallow.txt"),
        "shallow".to_string(),
    ));

    run_twig_command(dir.path(), &["add", "src"])
        .assert()
        .success();

    let expected = "\
=== Branches ===
*master

=== Staged Files ===
src/lib/deep.txt
src/shallow.txt

=== Removed Files ===

=== Modifications Not Staged For Commit ===

=== Untracked Files ===
top.txt

";
    let output = run_twig_command(dir.path(), &["status"]).output()?;
    assert_eq!(String::from_utf8(output.stdout)?, expected);

    Ok(())
}

#[rstest]
fn add_generated_files_one_by_one(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_twig_command(dir.path(), &["init"]).assert().success();

    let files = write_generated_files(dir.path(), 4);
    for file in &files {
        let file_name = file.path.file_name().ok_or("no file name")?;
        run_twig_command(dir.path(), &["add", &file_name.to_string_lossy()])
            .assert()
            .success();
    }

    let output = run_twig_command(dir.path(), &["status"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let staged = stdout
        .split("=== Staged Files ===\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\n").next())
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut expected = files
        .iter()
        .map(|file| file.path.file_name().unwrap().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    expected.sort();

    assert_eq!(staged, expected);

    Ok(())
}
