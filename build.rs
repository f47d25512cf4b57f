//! Stamps build metadata into the binary.
//!
//! | Variable            | Source                                        |
//! |---------------------|-----------------------------------------------|
//! | `SPA_VERSION`       | `SPA_VERSION`, else the package version       |
//! | `SPA_GIT_SHA`       | `SPA_GIT_SHA`, else `git describe`, else "unknown" |
//! | `SPA_BUILD_PROFILE` | cargo's `PROFILE` (debug/release)             |

use std::env;
use std::path::Path;
use std::process::Command;

fn export(key: &str, value: &str) {
    println!("cargo:rustc-env={}={}", key, value);
}

fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=7"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8(output.stdout).ok()?;
    Some(described.trim().to_string()).filter(|s| !s.is_empty())
}

fn main() {
    let version = env::var("SPA_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
    let git_sha = env::var("SPA_GIT_SHA")
        .ok()
        .or_else(describe_head)
        .unwrap_or_else(|| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    export("SPA_VERSION", &version);
    export("SPA_GIT_SHA", &git_sha);
    export("SPA_BUILD_PROFILE", &profile);

    for key in ["SPA_VERSION", "SPA_GIT_SHA"] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    if Path::new(".git/HEAD").exists() {
        println!("cargo:rerun-if-changed=.git/HEAD");
    }
}
