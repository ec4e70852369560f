use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{branch, channel, env, identity, version};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "packid")]
#[command(version = VERSION)]
#[command(about = "CLI for resolving Conan package identity in CI pipelines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the full package identity
    #[command(visible_alias = "resolve")]
    Identity(identity::IdentityArgs),
    /// Show the resolved source-control branch
    Branch(branch::BranchArgs),
    /// Show the resolved package channel
    Channel(channel::ChannelArgs),
    /// Version resolution and pinning
    Version(version::VersionArgs),
    /// Emit shell exports for later CI steps to eval
    Env(env::EnvArgs),
}

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Env(_) => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match response_mode(&cli.command) {
        ResponseMode::Raw => match commands::run_raw(cli.command) {
            Ok((content, exit_code)) => {
                println!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                output::print_json_result(Err(err));
                std::process::ExitCode::from(1)
            }
        },
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(cli.command);
            output::print_json_result(json_result);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
