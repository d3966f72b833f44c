use crate::common::command::{init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_commit_into_empty_directory(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = TempDir::new()?;
    let destination = target.child("snapshot");

    run_grit_command(
        init_repository_dir.path(),
        &["checkout", "HEAD", &destination.path().display().to_string()],
    )
    .assert()
    .success();

    destination.child("1.txt").assert("one");
    destination.child("a/2.txt").assert("two");
    destination.child("a/b/3.txt").assert("three");
    assert!(!destination.child(".git").path().exists());

    Ok(())
}
