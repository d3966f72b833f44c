use crate::common::command::run_grit_command;
use assert_fs::TempDir;
use assert_fs::prelude::*;

#[test]
fn hash_object_outside_a_repository() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("hello.txt").write_str("hi\n")?;

    run_grit_command(dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout("45b983be36b73c0788dc9cbcb76cbb80fc7bb057\n");

    // storing needs a repository
    run_grit_command(dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .failure();

    Ok(())
}
