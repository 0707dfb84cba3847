use serde::Serialize;

/// Compile-time metadata stamped by `build.rs`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

pub fn current() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("CASHFLOW_CORE_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("CASHFLOW_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("CASHFLOW_CORE_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cashflow_core {} ({} {}, built {})",
            self.version, self.git_hash, self.profile, self.timestamp
        )
    }
}
