mod common;

use assert_cmd::Command;
use common::create_fixture;
use predicates::prelude::*;
use std::fs;

fn lsr() -> Command {
    let mut cmd = Command::cargo_bin("lsr").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("BLOCKSIZE");
    cmd
}

#[test]
fn test_help_flag() {
    lsr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List directory contents"))
        .stdout(predicate::str::contains("--width"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_version_flag() {
    lsr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lsr"));
}

#[test]
fn test_nonexistent_path_exits_with_error() {
    lsr()
        .arg("/this/path/does/not/exist")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lsr: /this/path/does/not/exist"))
        .stderr(predicate::str::contains("No such file"));
}

#[test]
fn test_unknown_option_exits_1() {
    lsr().arg("-Z").assert().code(1);
}

#[test]
fn test_default_lists_current_directory() {
    let tmp = create_fixture(&["b", "a", "c/"]);
    lsr()
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout("a\nb\nc\n");
}

#[test]
fn test_hidden_entries_need_a_flag() {
    let tmp = create_fixture(&[".hidden", "a"]);
    // The superuser sees dot files by default.
    let expected = if uzers::get_effective_uid() == 0 {
        ".hidden\na\n"
    } else {
        "a\n"
    };
    lsr().current_dir(tmp.path()).assert().stdout(expected);
    lsr()
        .current_dir(tmp.path())
        .arg("-A")
        .assert()
        .stdout(".hidden\na\n");
    lsr()
        .current_dir(tmp.path())
        .arg("-a")
        .assert()
        .stdout(".\n..\n.hidden\na\n");
}

#[test]
fn test_recursive_listing_is_pre_order() {
    let tmp = create_fixture(&["a/x", "a/c/y", "b"]);
    lsr()
        .current_dir(tmp.path())
        .arg("-R")
        .assert()
        .success()
        .stdout(".:\na\nb\n\n./a:\nc\nx\n\n./a/c:\ny\n");
}

#[test]
fn test_file_operands_come_before_directories() {
    let tmp = create_fixture(&["f", "d/z", "e/"]);
    lsr()
        .current_dir(tmp.path())
        .args(["e", "d", "f"])
        .assert()
        .success()
        .stdout("f\n\nd:\nz\n\ne:\n");
}

#[test]
fn test_directory_flag_lists_operand_itself() {
    let tmp = create_fixture(&["d/z"]);
    lsr()
        .current_dir(tmp.path())
        .args(["-d", "d"])
        .assert()
        .stdout("d\n");
}

#[test]
fn test_empty_directory_long_format_prints_total() {
    let tmp = create_fixture(&["empty/"]);
    lsr()
        .current_dir(tmp.path())
        .args(["-l", "empty"])
        .assert()
        .success()
        .stdout("total 0\n");
}

#[test]
fn test_last_display_flag_wins() {
    let tmp = create_fixture(&["a", "b"]);
    lsr()
        .current_dir(tmp.path())
        .args(["-l", "-1"])
        .assert()
        .stdout("a\nb\n");
}

#[test]
fn test_columns_respect_width_override() {
    let names: Vec<String> = (0..12).map(|i| format!("file_{i:05}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let tmp = create_fixture(&refs);

    let output = lsr()
        .current_dir(tmp.path())
        .args(["-C", "--width", "80"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 2, "got {stdout:?}");
    assert_eq!(rows[0].split_whitespace().count(), 6);
    assert_eq!(rows[1].split_whitespace().count(), 6);
    assert!(rows[0].starts_with("file_00000 file_00001 "));
}

#[test]
fn test_classify_suffixes() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = create_fixture(&["d/", "exe", "plain"]);
    fs::set_permissions(tmp.path().join("exe"), fs::Permissions::from_mode(0o755)).unwrap();
    std::os::unix::fs::symlink("plain", tmp.path().join("link")).unwrap();

    lsr()
        .current_dir(tmp.path())
        .arg("-F")
        .assert()
        .success()
        .stdout("d/\nexe*\nlink@\nplain\n");
}

#[test]
fn test_long_format_symlink_targets() {
    let tmp = create_fixture(&["d/", "plain"]);
    std::os::unix::fs::symlink("plain", tmp.path().join("flink")).unwrap();
    std::os::unix::fs::symlink("d", tmp.path().join("dlink")).unwrap();
    std::os::unix::fs::symlink("nowhere", tmp.path().join("gone")).unwrap();

    let output = lsr()
        .current_dir(tmp.path())
        .args(["-nF", "flink", "dlink", "gone"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "got {stdout:?}");
    assert!(lines[0].starts_with('l'));
    assert!(lines[0].ends_with(" dlink -> d/"), "got {:?}", lines[0]);
    assert!(lines[1].ends_with(" flink -> plain"), "got {:?}", lines[1]);
    assert!(lines[2].ends_with(" gone -> nowhere@"), "got {:?}", lines[2]);
}

#[test]
fn test_size_sort_and_reverse() {
    let tmp = create_fixture(&[]);
    fs::write(tmp.path().join("big"), vec![0u8; 100]).unwrap();
    fs::write(tmp.path().join("small"), b"x").unwrap();
    fs::write(tmp.path().join("mid"), vec![0u8; 10]).unwrap();

    lsr()
        .current_dir(tmp.path())
        .arg("-S")
        .assert()
        .stdout("big\nmid\nsmall\n");
    lsr()
        .current_dir(tmp.path())
        .arg("-Sr")
        .assert()
        .stdout("small\nmid\nbig\n");
}

#[test]
fn test_control_characters_in_names() {
    let tmp = create_fixture(&["a\u{1}b"]);

    lsr()
        .current_dir(tmp.path())
        .assert()
        .stdout("a\u{1}b\n");
    lsr()
        .current_dir(tmp.path())
        .arg("-q")
        .assert()
        .stdout("a?b\n");
    lsr()
        .current_dir(tmp.path())
        .arg("-w")
        .assert()
        .stdout("a^Ab\n");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let tmp = create_fixture(&["a"]);
    lsr()
        .current_dir(tmp.path())
        .arg("-v")
        .assert()
        .success()
        .stdout("a\n")
        .stderr(predicate::str::contains("listing directory"));
}

#[test]
fn test_unreadable_directory_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = create_fixture(&["locked/secret"]);
    let locked = tmp.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Root ignores directory permissions.
    let readable = fs::read_dir(&locked).is_ok();

    let assert = lsr().current_dir(tmp.path()).arg("locked").assert();
    if readable {
        assert.success();
    } else {
        assert
            .code(1)
            .stderr(predicate::str::contains("locked"));
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
