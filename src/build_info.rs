//! Build information module
//!
//! Build number and timestamp embedded by build.rs, plus the startup banner.

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("BODYCALC_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("BODYCALC_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information structure for serialization
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    /// Get the current build info
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// Startup banner lines
    pub fn banner(&self) -> [String; 3] {
        [
            "Body Calculators (BMI / Body Fat / Ideal Weight)".to_string(),
            format!("{} {} build {}", self.name, self.version, self.build_number),
            format!("Compiled: {}", self.build_timestamp),
        ]
    }
}

/// Print the startup banner to stderr; stdout belongs to the MCP transport
pub fn print_startup_banner() {
    let lines = BuildInfo::current().banner();
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) + 4;
    eprintln!("{}", "=".repeat(width));
    for line in &lines {
        eprintln!("  {}", line);
    }
    eprintln!("{}", "=".repeat(width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("4x2"), None);
        assert_eq!(parse_u64(""), Some(0));
    }

    #[test]
    fn test_current_build_info() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "bodycalc");
        assert_eq!(info.version, VERSION);
        assert_eq!(info.build_number, BUILD_NUMBER);
    }

    #[test]
    fn test_banner_names_version_and_build() {
        let info = BuildInfo {
            name: "bodycalc",
            version: "1.2.3",
            build_number: 7,
            build_timestamp: "2026-01-01T00:00:00Z",
        };
        let lines = info.banner();
        assert_eq!(lines[1], "bodycalc 1.2.3 build 7");
        assert!(lines[2].ends_with("2026-01-01T00:00:00Z"));
    }
}
