use crate::common::command::{get_head_commit_sha, grit_stdout, init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_lightweight_tag(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head = get_head_commit_sha(dir.path())?;

    run_grit_command(dir.path(), &["tag", "v1"]).assert().success();
    run_grit_command(dir.path(), &["tag", "releases/v2", &head[..10]])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join(".git/refs/tags/v1"))?,
        format!("{head}\n")
    );
    assert_eq!(grit_stdout(dir.path(), &["tag"])?, "releases/v2\nv1\n");
    assert_eq!(
        grit_stdout(dir.path(), &["show-ref"])?,
        format!(
            "{head} refs/heads/master\n{head} refs/tags/releases/v2\n{head} refs/tags/v1\n"
        )
    );
    assert_eq!(grit_stdout(dir.path(), &["rev-parse", "v1"])?, format!("{head}\n"));

    Ok(())
}
