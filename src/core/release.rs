//! Release-branch version scanning and ordering.
//!
//! Versions on release branches are ordered through a fixed-width ordinal:
//! the three dot-separated components are zero-padded to five digits each and
//! concatenated into one integer. The encoding is order-preserving for
//! components below 100000 and is isolated here so the shape check (exactly
//! three numeric components) happens in one place.

use serde::Serialize;

/// Substring that marks a remote head as a release branch.
const RELEASE_BRANCH_MARKER: &str = "release-";

const GROUP_WIDTH: usize = 5;

/// A `MAJOR.MINOR.PATCH` version with its order-preserving ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseVersion {
    ordinal: u64,
    text: String,
}

impl ReleaseVersion {
    /// Parse a three-component numeric version. Anything else is `None`:
    /// wrong component count, empty components, non-digits.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        let mut encoded = String::with_capacity(3 * GROUP_WIDTH);
        for part in &parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            encoded.push_str(&"0".repeat(GROUP_WIDTH.saturating_sub(part.len())));
            encoded.push_str(part);
        }

        let ordinal = encoded.parse().ok()?;
        Some(Self {
            ordinal,
            text: text.to_string(),
        })
    }

    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal.cmp(&other.ordinal)
    }
}

/// Outcome of scanning a remote heads listing for release branches.
///
/// `Unavailable` (the listing could not be fetched) is distinct from
/// `NoReleases` (the listing was fetched but nothing matched).
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteReleases {
    Unavailable,
    NoReleases,
    Max(ReleaseVersion),
}

impl RemoteReleases {
    pub fn max(&self) -> Option<&ReleaseVersion> {
        match self {
            RemoteReleases::Max(version) => Some(version),
            _ => None,
        }
    }
}

/// Scan a remote heads listing for the highest release-branch version.
///
/// Each line containing `release-` contributes its trailing dash-delimited
/// token as a candidate; malformed candidates are skipped.
pub fn max_release_version(listing: Option<&str>) -> RemoteReleases {
    let Some(listing) = listing else {
        return RemoteReleases::Unavailable;
    };

    let mut max: Option<ReleaseVersion> = None;

    for line in listing.lines() {
        let line = line.trim();
        if !line.contains(RELEASE_BRANCH_MARKER) {
            continue;
        }

        let candidate = line.rsplit('-').next().unwrap_or(line);
        if let Some(version) = ReleaseVersion::parse(candidate) {
            if max.as_ref().map_or(true, |m| version.ordinal > m.ordinal) {
                max = Some(version);
            }
        }
    }

    match max {
        Some(version) => RemoteReleases::Max(version),
        None => RemoteReleases::NoReleases,
    }
}

/// Version for a development build: one minor ahead of whichever is newer,
/// the locally derived `base` or the highest remote release. Patch resets
/// to zero. `None` if the resulting base is not `MAJOR.MINOR.PATCH`.
pub fn dev_ahead_version(base: &str, remote: &RemoteReleases) -> Option<String> {
    let mut version = base.to_string();

    if let RemoteReleases::Max(remote_max) = remote {
        if let Some(local) = ReleaseVersion::parse(&version) {
            if remote_max.ordinal() > local.ordinal() {
                version = remote_max.as_str().to_string();
            }
        }
    }

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let minor: u64 = parts[1].parse().ok()?;
    Some(format!("{}.{}.0", parts[0], minor + 1))
}
