use crate::common::command::{grit_stdout, run_grit_command};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::predicate;

#[test]
fn write_blob_object_successfully() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    run_grit_command(dir.path(), &["init"]).assert().success();

    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    dir.child(&file_name).write_str(&file_content)?;

    run_grit_command(dir.path(), &["hash-object", "-w", &file_name])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?);
    let oid = grit_stdout(dir.path(), &["hash-object", &file_name])?;
    let oid = oid.trim();

    let object_path = dir.child(".git/objects").child(&oid[..2]).child(&oid[2..]);
    assert!(object_path.path().is_file());

    run_grit_command(dir.path(), &["cat-file", "blob", oid])
        .assert()
        .success()
        .stdout(file_content.clone());

    // abbreviated names resolve too
    run_grit_command(dir.path(), &["cat-file", "blob", &oid[..8]])
        .assert()
        .success()
        .stdout(file_content);

    Ok(())
}
