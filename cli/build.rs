//! Inject build metadata for `collector-bootstrap version`.
//!
//! - `COLLECTOR_BUILD_DATE`: RFC 3339 timestamp of the build
//! - `COLLECTOR_GIT_COMMIT`: short commit hash, or `none` outside a git checkout

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=../.git/HEAD");

    let date = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo::rustc-env=COLLECTOR_BUILD_DATE={date}");

    let commit = git_commit().unwrap_or_else(|| "none".to_string());
    println!("cargo::rustc-env=COLLECTOR_GIT_COMMIT={commit}");
}

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
