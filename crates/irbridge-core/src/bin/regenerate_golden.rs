//! Rewrites `tests/golden/<case>/expected_report.json` from each case's
//! `input.hex` (and `config.json`, when present).
//!
//! Run from the repository root. Case names given as arguments limit the run
//! to those cases.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use irbridge_core::{DispatchConfig, dispatch_file};

const GOLDEN_ROOT: &str = "tests/golden";
const INPUT_FILE: &str = "input.hex";
const CONFIG_FILE: &str = "config.json";
const REPORT_FILE: &str = "expected_report.json";

fn main() -> ExitCode {
    let only: BTreeSet<String> = std::env::args().skip(1).collect();
    match regenerate_all(Path::new(GOLDEN_ROOT), &only) {
        Ok(0) => {
            eprintln!("error: no golden cases matched");
            ExitCode::from(1)
        }
        Ok(count) => {
            eprintln!("regenerated {count} golden report(s)");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(1)
        }
    }
}

fn regenerate_all(root: &Path, only: &BTreeSet<String>) -> Result<usize, String> {
    let mut cases = golden_cases(root)?;
    if !only.is_empty() {
        cases.retain(|case| {
            case.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| only.contains(name))
        });
    }

    for case in &cases {
        let config = case_config(case)?;
        let input = case.join(INPUT_FILE);
        let report = dispatch_file(&input, config)
            .map_err(|err| format!("{}: {err}", input.display()))?;

        let mut json = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("{}: {err}", case.display()))?;
        json.push('\n');
        let output = case.join(REPORT_FILE);
        fs::write(&output, json).map_err(|err| format!("{}: {err}", output.display()))?;
        eprintln!("updated {}", output.display());
    }
    Ok(cases.len())
}

/// Case directories holding an input, in name order.
fn golden_cases(root: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(root).map_err(|err| format!("{}: {err}", root.display()))?;
    let mut cases = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| format!("{}: {err}", root.display()))?.path();
        if path.join(INPUT_FILE).is_file() {
            cases.push(path);
        }
    }
    cases.sort();
    Ok(cases)
}

fn case_config(case: &Path) -> Result<DispatchConfig, String> {
    let path = case.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(DispatchConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|err| format!("{}: {err}", path.display()))?;
    DispatchConfig::from_json_str(&text).map_err(|err| format!("{}: {err}", path.display()))
}
