use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("customplot").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("customplot"))
        .stdout(predicate::str::contains("gradient"));
}

#[test]
fn color_resolves_alias_hex_and_triple() {
    Command::cargo_bin("customplot")
        .unwrap()
        .args(["color", "strong-blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hex: #4C6FE7"))
        .stdout(predicate::str::contains("rgb: (76, 111, 231)"));

    Command::cargo_bin("customplot")
        .unwrap()
        .args(["color", "#de364f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hex: #DE364F"));

    Command::cargo_bin("customplot")
        .unwrap()
        .args(["color", "300,-5,16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hex: #FF0010"));
}

#[test]
fn invalid_color_fails() {
    Command::cargo_bin("customplot")
        .unwrap()
        .args(["color", "mauve-ish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mauve-ish is invalid"));
}

#[test]
fn palette_lists_aliases() {
    Command::cargo_bin("customplot")
        .unwrap()
        .args(["palette", "--supplementary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark-red"))
        .stdout(predicate::str::contains("#9F0023"));
}

#[test]
fn gradient_samples_endpoints() {
    let out = Command::cargo_bin("customplot")
        .unwrap()
        .args(["gradient", "bw", "--samples", "3"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "#F4F4F4");
    assert_eq!(lines[2], "#2A2A2A");

    Command::cargo_bin("customplot")
        .unwrap()
        .args(["gradient", "bw", "--samples", "3", "--reverse"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#2A2A2A"));
}

#[test]
fn unknown_gradient_fails() {
    Command::cargo_bin("customplot")
        .unwrap()
        .args(["gradient", "plasma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown gradient: plasma"));
}

#[test]
fn heatmap_from_csv() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("m.csv");
    fs::write(&input, "1,2,3\n4,,6\n7,8,9\n").unwrap();
    let out = tmp.path().join("m.svg");
    Command::cargo_bin("customplot")
        .unwrap()
        .arg("heatmap")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .args(["--gradient", "hot_cold", "--invert"])
        .assert()
        .success();
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn lines_autosave_via_config() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("t.csv");
    fs::write(&input, "year,DEU,USA\n2019,1,2\n2020,2,2.5\n2021,3,3.5\n").unwrap();
    let save_dir = tmp.path().join("figs");
    let config = tmp.path().join("style.json");
    fs::write(
        &config,
        serde_json::json!({ "save_dir": save_dir, "color_blind_mode": true }).to_string(),
    )
    .unwrap();

    Command::cargo_bin("customplot")
        .unwrap()
        .arg("lines")
        .arg("--input")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--scatter")
        .assert()
        .success();

    let written: Vec<_> = fs::read_dir(&save_dir).unwrap().collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn lines_rejects_non_numeric_cells() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("t.csv");
    fs::write(&input, "x,y\n1,abc\n").unwrap();
    Command::cargo_bin("customplot")
        .unwrap()
        .arg("lines")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(tmp.path().join("t.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a number"));
}
