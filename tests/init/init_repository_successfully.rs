use crate::common::command::run_grit_command;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;

#[test]
fn init_repository_successfully() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let dir_absolute_path = dir.path().canonicalize()?.display().to_string();

    run_grit_command(dir.path(), &["init", "project"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty Git repository in .+\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let git_dir = dir.path().join("project").join(".git");
    assert_eq!(
        std::fs::read_to_string(git_dir.join("HEAD"))?,
        "ref: refs/heads/master\n"
    );
    assert_eq!(
        std::fs::read_to_string(git_dir.join("config"))?,
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n"
    );
    for dir in ["branches", "objects", "refs/heads", "refs/tags"] {
        assert!(git_dir.join(dir).is_dir(), "{dir} is missing");
    }

    Ok(())
}
