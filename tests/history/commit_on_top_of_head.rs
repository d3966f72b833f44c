use crate::common::command::{
    get_head_commit_sha, grit_commit, grit_stdout, repository_dir, run_grit_command,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_on_top_of_head(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_grit_command(dir.path(), &["init"]).assert().success();

    dir.child("file.txt").write_str("first")?;
    run_grit_command(dir.path(), &["add", "file.txt"])
        .assert()
        .success();
    grit_commit(dir.path(), "  First commit\n\nWith a body  ")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[master [0-9a-f]{7}\] First commit\n$",
        )?);
    let first = get_head_commit_sha(dir.path())?;

    dir.child("file.txt").write_str("second")?;
    run_grit_command(dir.path(), &["add", "file.txt"])
        .assert()
        .success();
    grit_commit(dir.path(), "Second commit").assert().success();
    let second = get_head_commit_sha(dir.path())?;

    let root = grit_stdout(dir.path(), &["cat-file", "commit", &first])?;
    assert!(!root.contains("\nparent "));
    assert!(root.contains(
        "author fake_user <fake_email@email.com> 1672574400 +0000\n"
    ));
    assert!(root.ends_with("\n\nFirst commit\n\nWith a body\n"));

    let child = grit_stdout(dir.path(), &["cat-file", "commit", &second])?;
    assert!(child.contains(&format!("\nparent {first}\n")));

    Ok(())
}
