use crate::common::command::{grit_stdout, init_repository_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_files_to_index_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = grit_stdout(init_repository_dir.path(), &["ls-files"])?;
    assert_eq!(listing, "1.txt\na/2.txt\na/b/3.txt\n");

    let verbose = grit_stdout(init_repository_dir.path(), &["ls-files", "-v"])?;
    assert!(verbose.starts_with("Index file format v2, containing 3 entries.\n"));
    assert!(verbose.contains("  on blob: 43dd47ea691c90a5fa7827892c70241913351963\n"));
    assert!(verbose.contains("  regular file with perms: 644\n"));

    Ok(())
}
