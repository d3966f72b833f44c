use crate::common::command::{grit_stdout, init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn removing_an_unstaged_path_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    dir.child("untracked.txt").write_str("untracked")?;

    run_grit_command(dir.path(), &["rm", "1.txt", "untracked.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("paths are not in the index"))
        .stderr(predicate::str::contains("untracked.txt"));

    // nothing was removed
    dir.child("1.txt").assert("one");
    assert_eq!(
        grit_stdout(dir.path(), &["ls-files"])?,
        "1.txt\na/2.txt\na/b/3.txt\n"
    );

    run_grit_command(dir.path(), &["rm", "--ignore-unmatch", "1.txt", "untracked.txt"])
        .assert()
        .success();
    dir.child("untracked.txt").assert("untracked");
    assert_eq!(
        grit_stdout(dir.path(), &["ls-files"])?,
        "a/2.txt\na/b/3.txt\n"
    );

    Ok(())
}
