use clap::{Args, Subcommand};
use serde::Serialize;

use packid::config::ResolverConfig;
use packid::log_status;
use packid::markers;
use packid::release::RemoteReleases;
use packid::scm::GitScm;
use packid::{defaults, Error, Resolver};

use super::CmdResult;

#[derive(Args)]
pub struct VersionArgs {
    #[command(subcommand)]
    command: VersionCommand,
}

#[derive(Subcommand)]
enum VersionCommand {
    /// Show the resolved package version
    Show {
        /// Recipe directory containing marker files
        #[arg(long, default_value = ".")]
        recipe_dir: String,
    },
    /// Pin the resolved version into the write-once marker file
    Pin {
        /// Recipe directory the marker is written into
        #[arg(long, default_value = ".")]
        recipe_dir: String,
    },
    /// Show the development version, one minor ahead of the newest release
    Dev {
        /// Recipe directory containing marker files
        #[arg(long, default_value = ".")]
        recipe_dir: String,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum VersionOutput {
    Show(VersionShowOutput),
    Pin(VersionPinOutput),
    Dev(VersionDevOutput),
}

#[derive(Serialize)]
pub struct VersionShowOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    pub version: String,
}

#[derive(Serialize)]
pub struct VersionPinOutput {
    command: String,
    pub version: String,
    /// False when a marker already existed; the existing value stays.
    pub pinned: bool,
    marker_path: String,
}

#[derive(Serialize)]
pub struct VersionDevOutput {
    command: String,
    base_version: String,
    /// Highest release-branch version found on the remote, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_release: Option<String>,
    /// True when the remote heads listing could not be fetched at all.
    remote_unavailable: bool,
    pub version: String,
}

pub fn run(args: VersionArgs) -> CmdResult<VersionOutput> {
    match args.command {
        VersionCommand::Show { recipe_dir } => {
            let recipe_dir = super::resolve_recipe_dir(&recipe_dir);
            let config = ResolverConfig::from_env();
            let scm = GitScm::new(recipe_dir.clone());
            let resolver = Resolver::new(&config, &scm, &recipe_dir);

            let branch = resolver.branch();
            let version = resolver.version(branch.as_deref());

            Ok((
                VersionOutput::Show(VersionShowOutput {
                    command: "version.show".to_string(),
                    branch,
                    version,
                }),
                0,
            ))
        }
        VersionCommand::Pin { recipe_dir } => {
            let recipe_dir = super::resolve_recipe_dir(&recipe_dir);
            let config = ResolverConfig::from_env();
            let scm = GitScm::new(recipe_dir.clone());
            let resolver = Resolver::new(&config, &scm, &recipe_dir);

            let branch = resolver.branch();
            let version = resolver.version(branch.as_deref());
            let pinned = markers::pin_version(&recipe_dir, &version)?;
            if pinned {
                log_status!("version", "Pinned {} in {}", version, recipe_dir.display());
            }

            Ok((
                VersionOutput::Pin(VersionPinOutput {
                    command: "version.pin".to_string(),
                    version,
                    pinned,
                    marker_path: recipe_dir.join(defaults::VERSION_MARKER).display().to_string(),
                }),
                0,
            ))
        }
        VersionCommand::Dev { recipe_dir } => {
            let recipe_dir = super::resolve_recipe_dir(&recipe_dir);
            let config = ResolverConfig::from_env();
            let scm = GitScm::new(recipe_dir.clone());
            let resolver = Resolver::new(&config, &scm, &recipe_dir);

            let branch = resolver.branch();
            let (base_version, remote, ahead) = resolver.dev_version(branch.as_deref());
            let version = ahead.ok_or_else(|| {
                Error::validation_invalid_argument(
                    "version",
                    "Base version is not MAJOR.MINOR.PATCH",
                    Some(base_version.clone()),
                )
            })?;

            Ok((
                VersionOutput::Dev(VersionDevOutput {
                    command: "version.dev".to_string(),
                    base_version,
                    max_release: remote.max().map(|v| v.as_str().to_string()),
                    remote_unavailable: remote == RemoteReleases::Unavailable,
                    version,
                }),
                0,
            ))
        }
    }
}
