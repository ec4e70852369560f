use clap::Args;
use serde::Serialize;

use packid::config::ResolverConfig;
use packid::identity::PackageIdentity;
use packid::log_status;
use packid::scm::GitScm;
use packid::Resolver;

use super::CmdResult;

#[derive(Args)]
pub struct IdentityArgs {
    /// Recipe directory containing the descriptor and marker files
    #[arg(long, default_value = ".")]
    recipe_dir: String,
}

#[derive(Serialize)]
pub struct IdentityOutput {
    command: String,
    recipe_dir: String,
    #[serde(flatten)]
    identity: PackageIdentity,
}

pub fn run(args: IdentityArgs) -> CmdResult<IdentityOutput> {
    let recipe_dir = super::resolve_recipe_dir(&args.recipe_dir);
    let config = ResolverConfig::from_env();
    let scm = GitScm::new(recipe_dir.clone());
    let resolver = Resolver::new(&config, &scm, &recipe_dir);

    let identity = resolver.build_identity()?;
    log_status!(
        "identity",
        "Resolved {} ({}/{})",
        identity.reference,
        identity.username,
        identity.channel
    );

    Ok((
        IdentityOutput {
            command: "identity.resolve".to_string(),
            recipe_dir: recipe_dir.display().to_string(),
            identity,
        },
        0,
    ))
}
