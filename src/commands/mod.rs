mod dashes;
mod dots;
mod skeleton;
mod trace;
mod utils;

use crate::cli::Commands;
use singleline::SinglelineResult;

/// Dispatch the command to the appropriate handler.
pub fn dispatch(command: Commands) -> SinglelineResult<()> {
    match command {
        Commands::Skeleton(cmd) => skeleton::run(cmd),
        Commands::Trace(cmd) => trace::run(cmd),
        Commands::Dots(cmd) => dots::run(cmd),
        Commands::Dashes(cmd) => dashes::run(cmd),
    }
}
