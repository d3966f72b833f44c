use crate::common::command::{grit_stdout, init_repository_dir};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn list_all_blobs_from_head_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected_output = "100644 blob 43dd47ea691c90a5fa7827892c70241913351963\t1.txt\n\
100644 blob 64c5e5885a4b06010b3a0c20edb7900dd0311025\ta/2.txt\n\
100644 blob 1d19714ffbc272ba0da6eb419d66123c20527174\ta/b/3.txt\n";

    let actual_output = grit_stdout(init_repository_dir.path(), &["ls-tree", "-r", "HEAD"])?;

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}
