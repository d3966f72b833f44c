use crate::common::command::{
    get_head_commit_sha, grit_stdout, init_repository_dir, repository_dir, run_grit_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn rev_parse_resolves_names(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head = get_head_commit_sha(dir.path())?;
    let upper_head = head.to_uppercase();

    for name in ["HEAD", "master", &head[..7], upper_head.as_str()] {
        assert_eq!(
            grit_stdout(dir.path(), &["rev-parse", name])?,
            format!("{head}\n"),
            "resolving {name}"
        );
    }

    run_grit_command(dir.path(), &["rev-parse", "no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such reference no-such-branch"));

    Ok(())
}

#[rstest]
fn rev_parse_head_of_empty_repository_prints_nothing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_grit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_grit_command(repository_dir.path(), &["rev-parse", "HEAD"])
        .assert()
        .success()
        .stdout("");

    Ok(())
}
