use std::env;
use std::process::Command;

fn main() {
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string());
    let release_tag = format!("v{version}");

    // Release builds sit exactly on their tag; anything else is labelled
    // with the commit it was built from.
    let label = match git(&["describe", "--tags", "--exact-match", "HEAD"]) {
        Some(tag) if tag == release_tag => release_tag,
        _ => match git(&["rev-parse", "--short=7", "HEAD"]) {
            Some(hash) => format!("{release_tag} ({hash})"),
            None => release_tag,
        },
    };

    println!("cargo:rustc-env=SCMWS_VERSION_LABEL={label}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!stdout.is_empty()).then_some(stdout)
}
