use crate::common::command::{grit_stdout, repository_dir, run_grit_command};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_generated_files_to_index_successfully(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_grit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let files = write_generated_files(repository_dir.path(), 5);
    let mut names = files
        .iter()
        .map(|file| {
            file.path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    // staged one at a time, the index keeps growing
    for name in &names {
        run_grit_command(repository_dir.path(), &["add", name])
            .assert()
            .success();
    }

    names.sort();
    let expected = names
        .iter()
        .map(|name| format!("{name}\n"))
        .collect::<String>();
    assert_eq!(grit_stdout(repository_dir.path(), &["ls-files"])?, expected);

    Ok(())
}
