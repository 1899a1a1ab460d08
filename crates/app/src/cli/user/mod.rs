use clap::{Args, Subcommand};

mod create_admin;
mod promote;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    CreateAdmin(create_admin::CreateAdminArgs),
    Promote(promote::PromoteArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::CreateAdmin(args) => create_admin::run(args).await,
        UserSubcommand::Promote(args) => promote::run(args).await,
    }
}
