use crate::common::command::run_grit_command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;

#[test]
fn init_inside_populated_git_directory_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child(".git/HEAD").write_str("ref: refs/heads/main\n")?;

    run_grit_command(dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not empty"));

    // the existing metadata is left alone
    dir.child(".git/HEAD").assert("ref: refs/heads/main\n");

    Ok(())
}
