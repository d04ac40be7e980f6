//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Crate version as set in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line version banner for `--version`.
pub fn version_string() -> String {
    format!(
        "orbital-delivery {} ({} {})",
        VERSION, BUILD_DATE, BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // 7 hex chars from git, or a placeholder outside a checkout
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_format() {
        assert!(BUILD_DATE.len() == 10 || BUILD_DATE == "unknown");
    }

    #[test]
    fn test_version_string_mentions_all_parts() {
        let banner = version_string();
        assert!(banner.starts_with("orbital-delivery "));
        assert!(banner.contains(VERSION));
        assert!(banner.contains(BUILD_COMMIT));
        assert!(banner.contains(BUILD_DATE));
    }
}
