use crate::common::command::{init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_into_non_empty_directory_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = TempDir::new()?;
    target.child("keep.txt").write_str("keep")?;

    run_grit_command(
        init_repository_dir.path(),
        &["checkout", "HEAD", &target.path().display().to_string()],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not empty"));

    target.child("1.txt").assert(predicate::path::missing());

    Ok(())
}
