use crate::common::command::{
    get_head_commit_sha, grit_commit, grit_stdout, init_repository_dir, run_grit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_log_from_head_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let first = get_head_commit_sha(dir.path())?;

    write_file(FileSpec::new(dir.path().join("1.txt"), "uno".to_string()));
    run_grit_command(dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    grit_commit(dir.path(), "Translate one").assert().success();
    let second = get_head_commit_sha(dir.path())?;

    let log = grit_stdout(dir.path(), &["log"])?;
    let second_at = log
        .find(&format!("commit {second}"))
        .ok_or("second commit missing from log")?;
    let first_at = log
        .find(&format!("commit {first}"))
        .ok_or("first commit missing from log")?;
    assert!(second_at < first_at);
    assert!(log.contains("Author: fake_user <fake_email@email.com>\n"));
    assert!(log.contains("Date:   Sun Jan 1 12:00:00 2023 +0000\n"));
    assert!(log.contains("    Translate one\n"));

    // starting from an abbreviated sha only shows the root
    let root_log = grit_stdout(dir.path(), &["log", &first[..7]])?;
    assert!(root_log.contains("    Initial commit\n"));
    assert!(!root_log.contains(&second));

    Ok(())
}
