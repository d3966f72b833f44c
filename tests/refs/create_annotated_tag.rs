use crate::common::command::{get_head_commit_sha, grit_stdout, init_repository_dir, run_grit_command};
use assert_fs::TempDir;
use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;

#[rstest]
fn create_annotated_tag(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head = get_head_commit_sha(dir.path())?;

    run_grit_command(dir.path(), &["tag", "-a", "-m", "First release", "v1.0"])
        .env("GIT_AUTHOR_NAME", "fake_user")
        .env("GIT_AUTHOR_EMAIL", "fake_email@email.com")
        .assert()
        .success();

    let tag_oid = grit_stdout(dir.path(), &["rev-parse", "v1.0"])?;
    assert_ne!(tag_oid.trim(), head);

    let payload = grit_stdout(dir.path(), &["cat-file", "tag", "v1.0"])?;
    assert!(payload.starts_with(&format!("object {head}\ntype commit\ntag v1.0\n")));
    assert!(payload.contains("tagger fake_user <fake_email@email.com> "));
    assert!(payload.ends_with("\n\nFirst release\n"));

    // peeling follows the tag to the commit and on to its tree
    assert_eq!(
        grit_stdout(dir.path(), &["rev-parse", "--type", "commit", "v1.0"])?,
        format!("{head}\n")
    );
    assert_eq!(
        grit_stdout(dir.path(), &["rev-parse", "--type", "tree", "v1.0"])?,
        grit_stdout(dir.path(), &["rev-parse", "--type", "tree", "HEAD"])?
    );

    Ok(())
}
