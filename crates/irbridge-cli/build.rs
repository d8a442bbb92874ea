use std::env;
use std::process::Command;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    println!("cargo:rustc-env=IRBRIDGE_BUILD_COMMIT={}", build_commit());
    println!("cargo:rustc-env=IRBRIDGE_BUILD_DATE={}", build_date());
}

/// Short commit hash, suffixed with `-dirty` when the work tree has changes.
fn build_commit() -> String {
    let Some(full) = env::var("GITHUB_SHA")
        .ok()
        .filter(|sha| !sha.is_empty())
        .or_else(|| git(&["rev-parse", "HEAD"]))
    else {
        return UNKNOWN.to_string();
    };

    let mut short: String = full.chars().take(7).collect();
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"]).is_some();
    if dirty {
        short.push_str("-dirty");
    }
    short
}

/// `SOURCE_DATE_EPOCH` wins so that reproducible builds stay stable.
fn build_date() -> String {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.trim().parse::<i64>().ok())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .and_then(|date| date.format(&Rfc3339).ok())
        .or_else(|| git(&["log", "-1", "--format=%cI"]))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
