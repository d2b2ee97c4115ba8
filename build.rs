//! Build script for DietKit
//!
//! Bumps the persistent build counter and exports build metadata as
//! compile-time environment variables.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

/// Read the last recorded build number, treating a missing or garbled file as 0
fn previous_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=DIETKIT_BUILD_LABEL");

    let counter_path = Path::new(BUILD_NUMBER_FILE);
    let build_number = previous_build_number(counter_path) + 1;

    fs::write(counter_path, build_number.to_string())
        .expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let label = std::env::var("DIETKIT_BUILD_LABEL").unwrap_or_else(|_| "local".to_string());

    println!("cargo:rustc-env=DIETKIT_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=DIETKIT_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=DIETKIT_BUILD_LABEL={}", label);

    println!("cargo:warning=DietKit build #{} ({}) at {}", build_number, label, timestamp);
}
