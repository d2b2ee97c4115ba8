//! Build information
//!
//! Compile-time metadata embedded by `build.rs`.

use serde::Serialize;

/// Build number, bumped by every recompilation
pub const BUILD_NUMBER: u64 = match option_env!("DIETKIT_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp (ISO 8601, UTC)
pub const BUILD_TIMESTAMP: &str = match option_env!("DIETKIT_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Free-form label of the build environment (`local` unless overridden)
pub const BUILD_LABEL: &str = match option_env!("DIETKIT_BUILD_LABEL") {
    Some(s) => s,
    None => "local",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Serializable snapshot of the build metadata
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub build_label: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            build_label: BUILD_LABEL,
            description: DESCRIPTION,
        }
    }

    /// One-line summary used in the startup banner and status output
    pub fn summary(&self) -> String {
        format!(
            "{} v{} (build {}, {}, {})",
            self.name, self.version, self.build_number, self.build_label, self.build_timestamp
        )
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  DietKit - Clinical Nutrition Toolkit");
    eprintln!("  {}", info.summary());
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("4x2"), None);
    }

    #[test]
    fn test_summary_mentions_version() {
        let info = BuildInfo::current();
        assert!(info.summary().contains(VERSION));
        assert!(info.summary().starts_with(NAME));
    }
}
