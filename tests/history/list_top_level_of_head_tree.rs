use crate::common::command::{grit_stdout, init_repository_dir};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn list_top_level_of_head_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = grit_stdout(init_repository_dir.path(), &["ls-tree", "HEAD"])?;
    let lines = listing.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "100644 blob 43dd47ea691c90a5fa7827892c70241913351963\t1.txt"
    );
    let subtree = regex::Regex::new(r"^040000 tree [0-9a-f]{40}\ta$")?;
    assert!(subtree.is_match(lines[1]), "unexpected line {:?}", lines[1]);

    Ok(())
}
