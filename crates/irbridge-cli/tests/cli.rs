use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("irbridge"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_input(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("input.hex")
}

fn stdout_json(assert: assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_lists_dispatch() {
    cmd()
        .arg("message")
        .arg("dispatch")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--hex"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.hex");
    let report = temp.path().join("report.json");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("message.txt");
    std::fs::write(&input, "00").expect("write input");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_report() {
    let assert = cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("raw_then_delay"))
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(assert);
    assert_eq!(value["frames_decoded"], 2);
    assert_eq!(value["calls"][1]["call"], "delay");
    assert_eq!(value["calls"][1]["millis"], 10);
}

#[test]
fn inline_hex_message() {
    let assert = cmd()
        .arg("message")
        .arg("dispatch")
        .arg("--hex")
        .arg("01 05 03 EF 10 DF 20")
        .arg("--stdout")
        .arg("--message-gap-ms")
        .arg("0")
        .assert()
        .success();
    let value = stdout_json(assert);
    assert_eq!(value["input"]["path"], "-");
    assert_eq!(value["calls"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["calls"][0]["protocol"], "nec");
    assert_eq!(value["calls"][0]["code"], 0x20DF_10EFu32);
}

#[test]
fn legacy_revision_flags_delay_tag() {
    let assert = cmd()
        .arg("message")
        .arg("dispatch")
        .arg("--hex")
        .arg("01 03 EF 0A 00")
        .arg("--revision")
        .arg("legacy")
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(assert);
    assert_eq!(value["diagnostics"][0]["id"], "IR-UNKNOWN-ENCODING");
    assert!(value["config"]["tags"].get("delay").is_none());
}

#[test]
fn config_file_with_colliding_tags_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"tags": {"revision": "custom", "raw": 241, "panasonic_raw": 241}}"#,
    )
    .expect("write config");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg("--hex")
        .arg("00")
        .arg("--config")
        .arg(config)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("invalid config").and(contains("hint:")));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("panasonic_byte"))
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("panasonic_byte"))
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_written_and_quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("panasonic_byte"))
        .arg("-o")
        .arg(&report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());

    let written = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(value["calls"][0]["frequency"], 36_700);
    assert_eq!(value["calls"][0]["pulses"].as_array().map(Vec::len), Some(20));
}

#[test]
fn report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("message.hex");
    std::fs::write(&input, "00").expect("write input");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn list_diagnostics_outputs_ids() {
    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("scenario_literal"))
        .arg("--stdout")
        .arg("--log-level")
        .arg("off")
        .arg("--list-diagnostics")
        .assert()
        .success()
        .stderr(contains("Diagnostics:").and(contains("IR-TRAILING-DATA")));
}

#[test]
fn diagnostics_are_logged_as_warnings() {
    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("frame_overrun"))
        .arg("--stdout")
        .assert()
        .success()
        .stderr(contains("WARN").and(contains("overruns message")));
}

#[test]
fn strict_fails_when_diagnostics_present() {
    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("frame_overrun"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("dispatch diagnostics detected"));
}

#[test]
fn strict_passes_on_clean_message() {
    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(golden_input("raw_then_delay"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn panasonic_encode_prints_pulses() {
    let assert = cmd()
        .arg("panasonic")
        .arg("encode")
        .arg("01")
        .assert()
        .success();
    let value = stdout_json(assert);
    assert_eq!(value["frequency"], 36_700);
    let pulses = value["pulses"].as_array().expect("pulses");
    assert_eq!(pulses.len(), 20);
    assert_eq!(pulses[3]["duration_us"], 1296);
    assert_eq!(pulses[19]["duration_us"], 0);
}

#[test]
fn panasonic_encode_rejects_bad_hex() {
    cmd()
        .arg("panasonic")
        .arg("encode")
        .arg("0g")
        .assert()
        .failure()
        .stderr(contains("invalid packet bytes"));
}

#[test]
fn revision_flag_keeps_raw_aliases_from_config() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"tags": {"revision": "custom", "delay": 239, "raw": 240,
            "raw_aliases": [250], "panasonic_raw": 241}}"#,
    )
    .expect("write config");

    let assert = cmd()
        .arg("message")
        .arg("dispatch")
        .arg("--hex")
        .arg("01 05 FA 10 27 00 00")
        .arg("--config")
        .arg(config)
        .arg("--revision")
        .arg("legacy")
        .arg("--message-gap-ms")
        .arg("0")
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(assert);
    assert_eq!(value["config"]["tags"]["revision"], "legacy");
    assert_eq!(value["config"]["tags"]["raw_aliases"][0], 250);
    assert_eq!(value["calls"][0]["call"], "raw_intervals");
    assert_eq!(value["calls"][0]["frequency"], 10_000);
}

#[test]
fn versioned_config_cannot_move_roles() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"tags": {"revision": "current", "delay": 239, "raw": 250, "panasonic_raw": 241}}"#,
    )
    .expect("write config");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg("--hex")
        .arg("00")
        .arg("--config")
        .arg(config)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("revision current fixes the raw tag").and(contains("hint:")));
}

#[test]
fn glob_only_matches_message_files() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("capture.hex"), "01 03 EF 0A 00").expect("write hex");
    std::fs::write(temp.path().join("capture.txt"), "notes").expect("write txt");

    let assert = cmd()
        .arg("message")
        .arg("dispatch")
        .arg(temp.path().join("capture.*"))
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(assert);
    assert_eq!(value["input"]["bytes"], 5);
    assert_eq!(value["calls"][0]["millis"], 10);
}

#[test]
fn glob_with_several_messages_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("a.hex"), "00").expect("write a");
    std::fs::write(temp.path().join("b.bin"), [0u8]).expect("write b");

    cmd()
        .arg("message")
        .arg("dispatch")
        .arg(temp.path().join("*"))
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("matches 2 message files"));
}
