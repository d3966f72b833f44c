use crate::common::command::{
    get_head_commit_sha, grit_stdout, init_repository_dir, repository_dir, run_grit_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_refs_lists_heads_and_tags(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head = get_head_commit_sha(dir.path())?;

    std::fs::write(dir.path().join(".git/refs/heads/feature"), format!("{head}\n"))?;
    run_grit_command(dir.path(), &["tag", "-a", "-m", "first release", "v1"])
        .env("GIT_AUTHOR_NAME", "fake_user")
        .env("GIT_AUTHOR_EMAIL", "fake_email@email.com")
        .assert()
        .success();

    // annotated tags are listed with the tag object, not the commit
    let tag = std::fs::read_to_string(dir.path().join(".git/refs/tags/v1"))?;
    let tag = tag.trim();
    assert_ne!(tag, head);

    assert_eq!(
        grit_stdout(dir.path(), &["show-ref"])?,
        format!("{head} refs/heads/feature\n{head} refs/heads/master\n{tag} refs/tags/v1\n")
    );

    Ok(())
}

#[rstest]
fn show_refs_of_empty_repository_prints_nothing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_grit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(grit_stdout(repository_dir.path(), &["show-ref"])?, "");

    Ok(())
}
