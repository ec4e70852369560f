use serde_json::Value;
use std::path::PathBuf;

pub type CmdResult<T> = packid::Result<(T, i32)>;

pub mod branch;
pub mod channel;
pub mod env;
pub mod identity;
pub mod version;

/// Expand `~` in a user-supplied recipe directory argument.
pub(crate) fn resolve_recipe_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (packid::Result<Value>, i32) {
    crate::tty::status("packid is working...");

    match command {
        crate::Commands::Identity(args) => dispatch!(args, identity),
        crate::Commands::Branch(args) => dispatch!(args, branch),
        crate::Commands::Channel(args) => dispatch!(args, channel),
        crate::Commands::Version(args) => dispatch!(args, version),

        // Special case: env uses raw output mode
        crate::Commands::Env(_) => {
            let err = packid::Error::validation_invalid_argument(
                "output_mode",
                "Env command uses raw output mode",
                None,
            );
            crate::output::map_cmd_result_to_json::<Value>(Err(err))
        }
    }
}

pub(crate) fn run_raw(command: crate::Commands) -> packid::Result<(String, i32)> {
    match command {
        crate::Commands::Env(args) => env::run_raw(args),
        _ => Err(packid::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
        )),
    }
}
