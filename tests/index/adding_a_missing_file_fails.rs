use crate::common::command::{grit_stdout, init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_grit_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a file"));

    // directories are not files either
    run_grit_command(init_repository_dir.path(), &["add", "a"])
        .assert()
        .failure();

    assert_eq!(
        grit_stdout(init_repository_dir.path(), &["ls-files"])?,
        "1.txt\na/2.txt\na/b/3.txt\n"
    );

    Ok(())
}
