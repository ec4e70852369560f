//! Hard-coded defaults and the override vocabulary.
//!
//! Every optional lookup in the resolver terminates in one of these values,
//! so resolution is total for everything except the recipe package name.

/// Fallback organization when `CONAN_ORGANIZATION_NAME` is unset.
pub const DEFAULT_ORGANIZATION: &str = "tao-cpp";

/// Fallback login username when `CONAN_LOGIN_USERNAME` is unset.
pub const DEFAULT_LOGIN_USERNAME: &str = "fpelliccioni";

/// Fallback package username when both `CONAN_USERNAME` and the
/// `conan_user` marker are absent.
pub const DEFAULT_USERNAME: &str = "tao";

/// Fallback remote repository name when `PACKID_REPOSITORY` is unset.
pub const DEFAULT_REPOSITORY: &str = "tao";

pub const DEFAULT_VERSION_MAJOR: &str = "0";
pub const DEFAULT_VERSION_MINOR: &str = "1";

/// Patch component used when the commit count cannot be obtained.
pub const DEFAULT_COMMIT_COUNT: &str = "1";

/// Ref used for commit counting when no branch could be resolved.
pub const DEFAULT_COUNT_REF: &str = "master";

// Environment override vocabulary. PACKID_* variables are tool-specific;
// CONAN_* variables match what the packaging driver itself reads.
pub const ENV_BRANCH: &str = "PACKID_BRANCH";
pub const ENV_CI_BRANCH: &str = "CI_BRANCH";
pub const ENV_ORGANIZATION: &str = "CONAN_ORGANIZATION_NAME";
pub const ENV_LOGIN_USERNAME: &str = "CONAN_LOGIN_USERNAME";
pub const ENV_USERNAME: &str = "CONAN_USERNAME";
pub const ENV_CHANNEL: &str = "CONAN_CHANNEL";
pub const ENV_VERSION: &str = "CONAN_VERSION";
pub const ENV_UPLOAD: &str = "CONAN_UPLOAD";
pub const ENV_REMOTES: &str = "CONAN_REMOTES";
pub const ENV_REPOSITORY: &str = "PACKID_REPOSITORY";
pub const ENV_VERSION_MAJOR: &str = "PACKID_VERSION_MAJOR";
pub const ENV_VERSION_MINOR: &str = "PACKID_VERSION_MINOR";

// Per-recipe marker files. Single line, trailing newline stripped,
// absence is never an error.
pub const CHANNEL_MARKER: &str = "conan_channel";
pub const USERNAME_MARKER: &str = "conan_user";
pub const VERSION_MARKER: &str = "conan_version";

/// The recipe descriptor the package name is extracted from.
pub const RECIPE_FILE: &str = "conanfile.py";

/// Capture group 1 is the declared package name.
pub const RECIPE_NAME_PATTERN: &str = r#"name\s*=\s*["'](\S*)["']"#;

/// Remote repository URL for uploads, formed from organization and
/// repository name unless `CONAN_UPLOAD` overrides it.
pub fn upload_url(organization: &str, repository: &str) -> String {
    format!(
        "https://api.bintray.com/conan/{}/{}",
        organization.to_lowercase(),
        repository
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_lowercases_organization() {
        assert_eq!(
            upload_url("Tao-CPP", "tao"),
            "https://api.bintray.com/conan/tao-cpp/tao"
        );
    }
}
