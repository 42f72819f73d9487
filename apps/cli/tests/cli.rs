use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn scriptbundle(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scriptbundle").expect("binary exists");
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn write(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn default_run_bundles_assets_into_first_version() {
    let tmp = tempdir().unwrap();
    write(&tmp.path().join("Assets/A.cs"), b"class A{}");
    write(&tmp.path().join("Assets/sub/B.cs"), b"class B{}");

    scriptbundle(tmp.path())
        .arg("--no-pause")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processo concluído"))
        .stdout(predicate::str::contains("AllScripts0001.txt"));

    let doc = fs::read_to_string(tmp.path().join("AllScripts_CS/AllScripts0001.txt")).unwrap();
    assert!(doc.contains("\n1. A.cs\n2. B.cs\n"));
    assert!(doc.contains("----- Início Script \"A.cs\" -----\n\nclass A{}\n\n----- Final Script \"A.cs\" -----"));
}

#[test]
fn second_run_gets_next_version() {
    let tmp = tempdir().unwrap();
    write(&tmp.path().join("Assets/A.cs"), b"class A{}");
    write(&tmp.path().join("AllScripts_CS/AllScripts0005.txt"), b"old");

    scriptbundle(tmp.path()).arg("--no-pause").assert().success();
    scriptbundle(tmp.path()).arg("--no-pause").assert().success();

    assert!(tmp.path().join("AllScripts_CS/AllScripts0006.txt").exists());
    assert!(tmp.path().join("AllScripts_CS/AllScripts0007.txt").exists());
}

#[test]
fn empty_project_reports_and_writes_nothing() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("Assets")).unwrap();

    scriptbundle(tmp.path())
        .arg("--no-pause")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nenhum arquivo .cs encontrado"));

    assert!(!tmp.path().join("AllScripts_CS").exists());
}

#[test]
fn pause_is_skipped_without_a_terminal() {
    let tmp = tempdir().unwrap();
    write(&tmp.path().join("Assets/A.cs"), b"class A{}");

    scriptbundle(tmp.path())
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("Pressione Enter").not());
}

#[test]
fn flags_override_config_file() {
    let tmp = tempdir().unwrap();
    write(&tmp.path().join("Game/Shaders/Water.shader"), b"Shader \"Water\" {}");
    write(
        &tmp.path().join("scriptbundle.toml"),
        b"root_dir = \"Game\"\nextension = \"*.shader\"\nbase_name = \"FromFile\"\n",
    );

    scriptbundle(tmp.path())
        .args(["--no-pause", "--base-name", "Shaders", "--out", "bundles"])
        .assert()
        .success();

    let doc = fs::read_to_string(tmp.path().join("bundles/Shaders0001.txt")).unwrap();
    assert!(doc.contains("1. Water.shader"));
    assert!(!tmp.path().join("bundles/FromFile0001.txt").exists());
}

#[test]
fn missing_explicit_config_fails() {
    let tmp = tempdir().unwrap();

    scriptbundle(tmp.path())
        .args(["--no-pause", "--config", "nope.toml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Falha"));
}

#[test]
fn blocked_output_directory_is_fatal() {
    let tmp = tempdir().unwrap();
    write(&tmp.path().join("Assets/A.cs"), b"class A{}");
    write(&tmp.path().join("AllScripts_CS"), b"a file, not a directory");

    scriptbundle(tmp.path())
        .arg("--no-pause")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Falha"))
        .stdout(predicate::str::contains("AllScripts_CS"));
}

#[test]
fn fatal_error_is_reported_once() {
    let tmp = tempdir().unwrap();
    write(&tmp.path().join("Assets/A.cs"), b"class A{}");
    write(&tmp.path().join("AllScripts_CS"), b"a file, not a directory");

    let output = scriptbundle(tmp.path())
        .arg("--no-pause")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout.matches("Falha ao gerar o arquivo unificado").count(), 1);
    assert!(!stderr.contains("I/O error"), "stderr repeated the error: {stderr}");
}
