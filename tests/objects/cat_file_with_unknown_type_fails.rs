use crate::common::command::{init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn cat_file_with_unknown_type_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_grit_command(init_repository_dir.path(), &["cat-file", "blorb", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown object type"));

    Ok(())
}
