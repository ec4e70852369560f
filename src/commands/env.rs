use clap::{Args, ValueEnum};

use packid::config::ResolverConfig;
use packid::log_status;
use packid::markers;
use packid::scm::GitScm;
use packid::utils::shell;
use packid::Resolver;

#[derive(Args)]
pub struct EnvArgs {
    /// Recipe directory the version marker is written into
    #[arg(long, default_value = ".")]
    recipe_dir: String,

    /// Shell syntax to emit (defaults to the current platform's shell)
    #[arg(long, value_enum)]
    shell: Option<ShellKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellKind {
    Sh,
    Powershell,
}

/// Resolve branch, channel, full-build flag, and version, pin the version
/// marker, and emit one line of shell exports for later CI steps to eval.
pub fn run_raw(args: EnvArgs) -> packid::Result<(String, i32)> {
    let recipe_dir = super::resolve_recipe_dir(&args.recipe_dir);
    let config = ResolverConfig::from_env();
    let scm = GitScm::new(recipe_dir.clone());
    let resolver = Resolver::new(&config, &scm, &recipe_dir);

    let branch = resolver.branch();
    let channel = resolver.channel(branch.as_deref());
    let version = resolver.version(branch.as_deref());
    // A dev build skips the full build matrix.
    let full_build = if branch.as_deref() == Some("dev") { "0" } else { "1" };

    if markers::pin_version(&recipe_dir, &version)? {
        log_status!("env", "Pinned version {} in {}", version, recipe_dir.display());
    }

    let shell_kind = args.shell.unwrap_or(if cfg!(windows) {
        ShellKind::Powershell
    } else {
        ShellKind::Sh
    });

    let vars = [
        ("PACKID_BRANCH", branch.unwrap_or_default()),
        ("PACKID_CHANNEL", channel.clone()),
        ("PACKID_FULL_BUILD", full_build.to_string()),
        ("PACKID_VERSION", version),
        ("CONAN_CHANNEL", channel),
    ];

    Ok((format_exports(shell_kind, &vars), 0))
}

fn format_exports(kind: ShellKind, vars: &[(&str, String)]) -> String {
    match kind {
        ShellKind::Sh => {
            let assignments: Vec<String> = vars
                .iter()
                .map(|(key, value)| format!("{}={}", key, shell::quote_arg(value)))
                .collect();
            format!("export {}", assignments.join(" "))
        }
        ShellKind::Powershell => vars
            .iter()
            .map(|(key, value)| format!("$Env:{}={};", key, shell::quote_powershell(value)))
            .collect::<Vec<String>>()
            .join(" "),
    }
}
