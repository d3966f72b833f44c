use crate::common::command::run_grit_command;
use assert_fs::TempDir;
use predicates::prelude::predicate;

#[test]
fn commands_outside_a_repository_fail() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    run_grit_command(dir.path(), &["ls-files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));

    Ok(())
}
