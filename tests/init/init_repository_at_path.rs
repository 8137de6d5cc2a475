use crate::common::command::{METADATA_DIR, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_at_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir
        .path()
        .canonicalize()?
        .join("nested")
        .join("project");

    run_twig_command(repository_dir.path(), &["init", &target.to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("project"));

    assert!(target.join(METADATA_DIR).join("HEAD").is_file());
    assert!(!repository_dir.path().join(METADATA_DIR).exists());

    Ok(())
}
