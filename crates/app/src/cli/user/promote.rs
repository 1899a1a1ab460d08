use clap::Args;
use shopfront_app::domain::users::{PgUsersService, UsersService};

#[derive(Debug, Args)]
pub(crate) struct PromoteArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User to change
    #[arg(long)]
    username: String,

    /// Remove the admin role instead of granting it
    #[arg(long)]
    revoke: bool,
}

pub(crate) async fn run(args: PromoteArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let user = PgUsersService::new(db)
        .set_admin(&args.username, !args.revoke)
        .await
        .map_err(|error| format!("failed to update user {}: {error}", args.username))?;

    println!("username: {}", user.username);
    println!("is_admin: {}", user.is_admin);

    Ok(())
}
