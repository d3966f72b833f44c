use crate::common::command::{grit_stdout, init_repository_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn write_tree_matches_committed_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let written = grit_stdout(init_repository_dir.path(), &["write-tree"])?;
    let committed = grit_stdout(
        init_repository_dir.path(),
        &["rev-parse", "--type", "tree", "HEAD"],
    )?;

    assert_eq!(written, committed);
    assert_eq!(written.trim().len(), 40);

    Ok(())
}
