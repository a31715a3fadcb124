use std::process::Command;

fn hsdsql() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hsdsql"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_model_prints_nothing() {
    let output = hsdsql().output().expect("run hsdsql");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_no_query_prints_nothing() {
    let output = hsdsql().args(["--model", "dps"]).output().expect("run hsdsql");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_file_translation() {
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/match_all.xml");
    let output = hsdsql()
        .args(["--file", fixture, "--model", "dps"])
        .output()
        .expect("run hsdsql");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("SELECT `hsd_id`,`title`,`owner` FROM `calc_bug`"));
}

#[test]
fn test_invalid_model_is_rejected() {
    let output = hsdsql().args(["--model", "mysql"]).output().expect("run hsdsql");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_help_exits_zero() {
    let output = hsdsql().arg("--help").output().expect("run hsdsql");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--model"));
}
