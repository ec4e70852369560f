//! Package identity resolution.
//!
//! Computes the deterministic package identity (name, version, channel,
//! username, upload target) a CI job hands to the packaging driver. Every
//! value is resolved through a total fallback chain over environment
//! overrides, per-recipe marker files, source-control state, and hard-coded
//! defaults; the declared package name is the only mandatory input.

use serde::Serialize;
use std::path::Path;

use crate::config::ResolverConfig;
use crate::defaults;
use crate::error::Result;
use crate::markers;
use crate::recipe;
use crate::release::{self, RemoteReleases};
use crate::scm::Scm;

/// Fully resolved identity, produced fresh on each invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageIdentity {
    pub name: String,
    pub organization: String,
    pub login_username: String,
    pub username: String,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub version: String,
    /// `name/version`, the reference handed to the packaging driver.
    pub reference: String,
    pub upload_url: String,
    pub remotes: Vec<String>,
}

/// Map a branch name to its package channel.
///
/// Total: `dev` maps to `testing`, `feature*` branches are their own channel,
/// everything else (including no branch at all) is `stable`.
pub fn branch_to_channel(branch: Option<&str>) -> String {
    match branch {
        None => "stable".to_string(),
        Some("dev") => "testing".to_string(),
        Some(b) if b.starts_with("feature") => b.to_string(),
        Some(_) => "stable".to_string(),
    }
}

/// A development branch is anything that is not `master`, a release branch,
/// or a hotfix branch.
pub fn is_development_branch(branch: Option<&str>) -> bool {
    match branch {
        None => false,
        Some("master") => false,
        Some(b) => !b.starts_with("release") && !b.starts_with("hotfix"),
    }
}

/// Version embedded in a release or hotfix branch name, e.g.
/// `release-1.2.3` or `hotfix_1.2.4`.
fn version_from_branch_name(branch: &str) -> Option<String> {
    for separator in ['-', '_'] {
        for prefix in ["release", "hotfix"] {
            let full = format!("{}{}", prefix, separator);
            if let Some(rest) = branch.strip_prefix(full.as_str()) {
                return Some(rest.to_string());
            }
        }
    }
    None
}

/// Resolves identity values against a config snapshot, an SCM client, and a
/// recipe directory. Pure apart from marker-file reads and SCM queries, so
/// identical inputs always resolve to identical identities.
pub struct Resolver<'a, S: Scm> {
    config: &'a ResolverConfig,
    scm: &'a S,
    recipe_dir: &'a Path,
}

impl<'a, S: Scm> Resolver<'a, S> {
    pub fn new(config: &'a ResolverConfig, scm: &'a S, recipe_dir: &'a Path) -> Self {
        Self {
            config,
            scm,
            recipe_dir,
        }
    }

    /// Current branch: primary override, then CI-provided override, then the
    /// checkout itself. `None` when nothing knows the branch.
    pub fn branch(&self) -> Option<String> {
        self.config
            .branch
            .clone()
            .or_else(|| self.config.ci_branch.clone())
            .or_else(|| self.scm.current_branch())
    }

    /// Channel: marker file, then environment override, then derived from
    /// the branch name.
    pub fn channel(&self, branch: Option<&str>) -> String {
        markers::channel_marker(self.recipe_dir)
            .or_else(|| self.config.channel.clone())
            .unwrap_or_else(|| branch_to_channel(branch))
    }

    /// Version: marker file, then environment override, then the version
    /// embedded in a release/hotfix branch name, then `MAJOR.MINOR.<count>`.
    pub fn version(&self, branch: Option<&str>) -> String {
        markers::version_marker(self.recipe_dir)
            .or_else(|| self.config.version.clone())
            .or_else(|| branch.and_then(version_from_branch_name))
            .unwrap_or_else(|| self.commit_count_version(branch))
    }

    fn commit_count_version(&self, branch: Option<&str>) -> String {
        let major = self
            .config
            .version_major
            .as_deref()
            .unwrap_or(defaults::DEFAULT_VERSION_MAJOR);
        let minor = self
            .config
            .version_minor
            .as_deref()
            .unwrap_or(defaults::DEFAULT_VERSION_MINOR);
        let count = self
            .scm
            .commit_count(branch.unwrap_or(defaults::DEFAULT_COUNT_REF))
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| defaults::DEFAULT_COMMIT_COUNT.to_string());
        format!("{}.{}.{}", major, minor, count)
    }

    /// Development version: the resolved base version, the remote release
    /// scan result, and the dev-ahead version composed from them.
    pub fn dev_version(&self, branch: Option<&str>) -> (String, RemoteReleases, Option<String>) {
        let base = self.version(branch);
        let remote = release::max_release_version(self.scm.remote_heads().as_deref());
        let ahead = release::dev_ahead_version(&base, &remote);
        (base, remote, ahead)
    }

    pub fn organization(&self) -> String {
        self.config
            .organization
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_ORGANIZATION.to_string())
    }

    pub fn login_username(&self) -> String {
        self.config
            .login_username
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_LOGIN_USERNAME.to_string())
    }

    /// Package username: environment override, then marker file, then default.
    pub fn username(&self) -> String {
        self.config
            .username
            .clone()
            .or_else(|| markers::username_marker(self.recipe_dir))
            .unwrap_or_else(|| defaults::DEFAULT_USERNAME.to_string())
    }

    pub fn repository(&self) -> String {
        self.config
            .repository
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_REPOSITORY.to_string())
    }

    pub fn upload_url(&self) -> String {
        self.config
            .upload
            .clone()
            .unwrap_or_else(|| defaults::upload_url(&self.organization(), &self.repository()))
    }

    /// Remotes: comma-separated override, or a single remote formed from the
    /// organization and repository (independent of any `upload` override).
    pub fn remotes(&self) -> Vec<String> {
        match &self.config.remotes {
            Some(list) => list
                .split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            None => vec![defaults::upload_url(&self.organization(), &self.repository())],
        }
    }

    /// Resolve the full identity. Fails only when the recipe descriptor is
    /// unreadable or declares no package name.
    pub fn build_identity(&self) -> Result<PackageIdentity> {
        let name = recipe::package_name(self.recipe_dir)?;
        let branch = self.branch();
        let channel = self.channel(branch.as_deref());
        let version = self.version(branch.as_deref());
        let reference = format!("{}/{}", name, version);

        Ok(PackageIdentity {
            name,
            organization: self.organization(),
            login_username: self.login_username(),
            username: self.username(),
            channel,
            branch,
            version,
            reference,
            upload_url: self.upload_url(),
            remotes: self.remotes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scm::Scm;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct StubScm {
        branch: Option<String>,
        heads: Option<String>,
        count: Option<String>,
    }

    impl Scm for StubScm {
        fn current_branch(&self) -> Option<String> {
            self.branch.clone()
        }

        fn remote_heads(&self) -> Option<String> {
            self.heads.clone()
        }

        fn commit_count(&self, _reference: &str) -> Option<String> {
            self.count.clone()
        }
    }

    fn recipe_dir_with_name(name: &str) -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("conanfile.py"),
            format!("class C(ConanFile):\n    name = \"{}\"\n", name),
        )
        .unwrap();
        dir
    }

    #[test]
    fn channel_vocabulary_is_fixed() {
        assert_eq!(branch_to_channel(Some("dev")), "testing");
        assert_eq!(branch_to_channel(Some("release-1.2.3")), "stable");
        assert_eq!(branch_to_channel(Some("hotfix-1.2.4")), "stable");
        assert_eq!(branch_to_channel(Some("feature-x")), "feature-x");
        assert_eq!(branch_to_channel(Some("anything-else")), "stable");
        assert_eq!(branch_to_channel(None), "stable");
    }

    #[test]
    fn development_branch_detection() {
        assert!(!is_development_branch(None));
        assert!(!is_development_branch(Some("master")));
        assert!(!is_development_branch(Some("release-1.0.0")));
        assert!(!is_development_branch(Some("hotfix_2.0.0")));
        assert!(is_development_branch(Some("dev")));
        assert!(is_development_branch(Some("feature-x")));
    }

    #[test]
    fn branch_prefers_primary_override() {
        let config = ResolverConfig {
            branch: Some("dev".to_string()),
            ci_branch: Some("master".to_string()),
            ..Default::default()
        };
        let scm = StubScm {
            branch: Some("feature-y".to_string()),
            ..Default::default()
        };
        let dir = tempdir().unwrap();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.branch(), Some("dev".to_string()));
    }

    #[test]
    fn branch_falls_back_to_ci_then_scm() {
        let config = ResolverConfig {
            ci_branch: Some("master".to_string()),
            ..Default::default()
        };
        let scm = StubScm {
            branch: Some("feature-y".to_string()),
            ..Default::default()
        };
        let dir = tempdir().unwrap();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.branch(), Some("master".to_string()));

        let config = ResolverConfig::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.branch(), Some("feature-y".to_string()));

        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.branch(), None);
    }

    #[test]
    fn version_marker_beats_env_override() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("conan_version"), "4.5.6\n").unwrap();
        let config = ResolverConfig {
            version: Some("7.8.9".to_string()),
            ..Default::default()
        };
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.version(None), "4.5.6");
    }

    #[test]
    fn version_env_beats_branch_derivation() {
        let dir = tempdir().unwrap();
        let config = ResolverConfig {
            version: Some("7.8.9".to_string()),
            ..Default::default()
        };
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.version(Some("release-3.0.0")), "7.8.9");
    }

    #[test]
    fn version_derives_from_release_branch_name() {
        let dir = tempdir().unwrap();
        let config = ResolverConfig::default();
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.version(Some("release-3.0.0")), "3.0.0");
        assert_eq!(resolver.version(Some("hotfix-3.0.1")), "3.0.1");
        assert_eq!(resolver.version(Some("release_4.0.0")), "4.0.0");
        assert_eq!(resolver.version(Some("hotfix_4.0.1")), "4.0.1");
    }

    #[test]
    fn version_composes_commit_count() {
        let dir = tempdir().unwrap();
        let config = ResolverConfig {
            version_major: Some("1".to_string()),
            version_minor: Some("2".to_string()),
            ..Default::default()
        };
        let scm = StubScm {
            count: Some("45".to_string()),
            ..Default::default()
        };
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.version(Some("dev")), "1.2.45");
    }

    #[test]
    fn version_defaults_when_count_unavailable() {
        let dir = tempdir().unwrap();
        let config = ResolverConfig::default();
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.version(None), "0.1.1");
    }

    #[test]
    fn channel_marker_beats_env_and_branch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("conan_channel"), "nightly\n").unwrap();
        let config = ResolverConfig {
            channel: Some("stable".to_string()),
            ..Default::default()
        };
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.channel(Some("dev")), "nightly");
    }

    #[test]
    fn username_env_beats_marker() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("conan_user"), "filed\n").unwrap();
        let config = ResolverConfig {
            username: Some("enved".to_string()),
            ..Default::default()
        };
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.username(), "enved");

        let config = ResolverConfig::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(resolver.username(), "filed");
    }

    #[test]
    fn remotes_env_is_comma_split() {
        let dir = tempdir().unwrap();
        let config = ResolverConfig {
            remotes: Some("https://a.example/x, https://b.example/y".to_string()),
            ..Default::default()
        };
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        assert_eq!(
            resolver.remotes(),
            vec!["https://a.example/x".to_string(), "https://b.example/y".to_string()]
        );
    }

    #[test]
    fn build_identity_resolves_release_branch_end_to_end() {
        let dir = recipe_dir_with_name("algorithm");
        let config = ResolverConfig {
            branch: Some("release-3.0.0".to_string()),
            ..Default::default()
        };
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        let identity = resolver.build_identity().unwrap();

        assert_eq!(identity.name, "algorithm");
        assert_eq!(identity.version, "3.0.0");
        assert_eq!(identity.channel, "stable");
        assert_eq!(identity.reference, "algorithm/3.0.0");
        assert_eq!(identity.username, "tao");
        assert_eq!(identity.upload_url, "https://api.bintray.com/conan/tao-cpp/tao");
        assert_eq!(identity.remotes, vec![identity.upload_url.clone()]);
    }

    #[test]
    fn build_identity_is_idempotent() {
        let dir = recipe_dir_with_name("algorithm");
        let config = ResolverConfig {
            version_major: Some("1".to_string()),
            version_minor: Some("2".to_string()),
            ..Default::default()
        };
        let scm = StubScm {
            branch: Some("dev".to_string()),
            count: Some("45".to_string()),
            ..Default::default()
        };
        let resolver = Resolver::new(&config, &scm, dir.path());
        let first = resolver.build_identity().unwrap();
        let second = resolver.build_identity().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.version, "1.2.45");
        assert_eq!(first.channel, "testing");
    }

    #[test]
    fn upload_override_does_not_leak_into_remotes() {
        let dir = recipe_dir_with_name("algorithm");
        let config = ResolverConfig {
            upload: Some("https://upload.example/conan".to_string()),
            ..Default::default()
        };
        let scm = StubScm::default();
        let resolver = Resolver::new(&config, &scm, dir.path());
        let identity = resolver.build_identity().unwrap();
        assert_eq!(identity.upload_url, "https://upload.example/conan");
        assert_eq!(
            identity.remotes,
            vec!["https://api.bintray.com/conan/tao-cpp/tao".to_string()]
        );
    }
}
