//! Build version information.

/// Build version, injected at compile time via `NWS_ALERTS_BUILD_VERSION`.
pub const BUILD_VERSION: &str = match option_env!("NWS_ALERTS_BUILD_VERSION") {
    Some(version) => version,
    None => "Unknown",
};

/// Git commit id, injected at compile time via `NWS_ALERTS_COMMIT_ID`.
pub const COMMIT_ID: &str = match option_env!("NWS_ALERTS_COMMIT_ID") {
    Some(commit) => commit,
    None => "",
};

/// Version string stamped onto every report: `<build-version>.<commit-id>`.
pub fn service_version() -> String {
    format_version(BUILD_VERSION, COMMIT_ID)
}

fn format_version(build: &str, commit: &str) -> String {
    format!("{}.{}", build, commit)
}
