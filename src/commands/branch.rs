use clap::Args;
use serde::Serialize;

use packid::config::ResolverConfig;
use packid::scm::GitScm;
use packid::Resolver;

use super::CmdResult;

#[derive(Args)]
pub struct BranchArgs {
    /// Directory of the source-control checkout
    #[arg(long, default_value = ".")]
    recipe_dir: String,
}

#[derive(Serialize)]
pub struct BranchOutput {
    command: String,
    /// Null when neither the environment nor the checkout knows the branch.
    branch: Option<String>,
}

pub fn run(args: BranchArgs) -> CmdResult<BranchOutput> {
    let recipe_dir = super::resolve_recipe_dir(&args.recipe_dir);
    let config = ResolverConfig::from_env();
    let scm = GitScm::new(recipe_dir.clone());
    let resolver = Resolver::new(&config, &scm, &recipe_dir);

    Ok((
        BranchOutput {
            command: "branch.show".to_string(),
            branch: resolver.branch(),
        },
        0,
    ))
}
