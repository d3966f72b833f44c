use crate::common::command::{grit_stdout, init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn remove_files_from_index_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_grit_command(dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    dir.child("1.txt").assert(predicate::path::missing());

    run_grit_command(dir.path(), &["rm", "--cached", "a/2.txt"])
        .assert()
        .success();
    dir.child("a/2.txt").assert("two");

    assert_eq!(grit_stdout(dir.path(), &["ls-files"])?, "a/b/3.txt\n");

    Ok(())
}
