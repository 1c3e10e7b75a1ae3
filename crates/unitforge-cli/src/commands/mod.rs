//! Command dispatch and handler modules.

mod compose;
mod lock;
mod tree;
mod verify;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Lock { dir } => lock::exec(&dir, cli.verbose).await,
        Command::Verify { dir, json } => verify::exec(&dir, json),
        Command::Compose { unit, dir, output } => {
            compose::exec(&dir, &unit, output.as_deref(), cli.verbose).await
        }
        Command::Tree { unit, dir } => tree::exec(&dir, &unit).await,
    }
}
