//! Environment override snapshot.
//!
//! The resolver never reads the process environment directly. All overrides
//! are captured once into a `ResolverConfig`, so tests can build configs by
//! hand and two resolutions against the same config are identical.

use crate::defaults;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverConfig {
    /// Primary branch override (`PACKID_BRANCH`).
    pub branch: Option<String>,
    /// Secondary, CI-provider-supplied branch (`CI_BRANCH`).
    pub ci_branch: Option<String>,
    pub organization: Option<String>,
    pub login_username: Option<String>,
    pub username: Option<String>,
    pub channel: Option<String>,
    pub version: Option<String>,
    pub upload: Option<String>,
    /// Comma-separated remote list override.
    pub remotes: Option<String>,
    pub repository: Option<String>,
    pub version_major: Option<String>,
    pub version_minor: Option<String>,
}

impl ResolverConfig {
    /// Snapshot the override vocabulary from the process environment.
    /// Empty or whitespace-only values count as unset.
    pub fn from_env() -> Self {
        Self {
            branch: env_non_empty(defaults::ENV_BRANCH),
            ci_branch: env_non_empty(defaults::ENV_CI_BRANCH),
            organization: env_non_empty(defaults::ENV_ORGANIZATION),
            login_username: env_non_empty(defaults::ENV_LOGIN_USERNAME),
            username: env_non_empty(defaults::ENV_USERNAME),
            channel: env_non_empty(defaults::ENV_CHANNEL),
            version: env_non_empty(defaults::ENV_VERSION),
            upload: env_non_empty(defaults::ENV_UPLOAD),
            remotes: env_non_empty(defaults::ENV_REMOTES),
            repository: env_non_empty(defaults::ENV_REPOSITORY),
            version_major: env_non_empty(defaults::ENV_VERSION_MAJOR),
            version_minor: env_non_empty(defaults::ENV_VERSION_MINOR),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_overrides() {
        let config = ResolverConfig::default();
        assert!(config.branch.is_none());
        assert!(config.channel.is_none());
        assert!(config.version_major.is_none());
    }

    #[test]
    fn env_non_empty_filters_blank_values() {
        std::env::set_var("PACKID_TEST_BLANK", "   ");
        assert_eq!(env_non_empty("PACKID_TEST_BLANK"), None);
        std::env::set_var("PACKID_TEST_BLANK", "value");
        assert_eq!(env_non_empty("PACKID_TEST_BLANK"), Some("value".to_string()));
        std::env::remove_var("PACKID_TEST_BLANK");
    }
}
