use clap::Args;
use serde::Serialize;

use packid::config::ResolverConfig;
use packid::scm::GitScm;
use packid::Resolver;

use super::CmdResult;

#[derive(Args)]
pub struct ChannelArgs {
    /// Branch name to map (defaults to the resolved branch)
    #[arg(long)]
    branch: Option<String>,

    /// Recipe directory whose channel marker takes precedence
    #[arg(long, default_value = ".")]
    recipe_dir: String,
}

#[derive(Serialize)]
pub struct ChannelOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    pub channel: String,
}

pub fn run(args: ChannelArgs) -> CmdResult<ChannelOutput> {
    let recipe_dir = super::resolve_recipe_dir(&args.recipe_dir);
    let config = ResolverConfig::from_env();
    let scm = GitScm::new(recipe_dir.clone());
    let resolver = Resolver::new(&config, &scm, &recipe_dir);

    let branch = args.branch.or_else(|| resolver.branch());
    let channel = resolver.channel(branch.as_deref());

    Ok((
        ChannelOutput {
            command: "channel.show".to_string(),
            branch,
            channel,
        },
        0,
    ))
}
