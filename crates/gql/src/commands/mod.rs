mod execute;
mod validate;

use crate::Cli;
use crate::CommandResult;
use execute::ExecuteCmd;
use validate::ValidateCmd;

#[derive(Debug, clap::Subcommand)]
pub(crate) enum CommandEnum {
    /// Build a schema and validate operation documents against it.
    Validate(Box<ValidateCmd>),
    /// Execute an operation against a JSON root value.
    Execute(Box<ExecuteCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Validate(cmd) => cmd.run(cli).await,
            Self::Execute(cmd) => cmd.run(cli).await,
        }
    }
}
