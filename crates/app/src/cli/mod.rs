use clap::{Parser, Subcommand};

mod db;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "shopfront-app", about = "Shopfront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connect to the database named on the command line.
pub(crate) async fn connect(database_url: &str) -> Result<shopfront_app::database::Db, String> {
    shopfront_app::database::connect(database_url)
        .await
        .map(shopfront_app::database::Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
