use clap::Args;
use shopfront_app::auth::PgAuthService;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User that should own the token
    #[arg(long)]
    username: String,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgAuthService::new(db);

    let issued = service
        .issue_api_token_for_username(&args.username)
        .await
        .map_err(|error| format!("failed to create token for {}: {error}", args.username))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_uuid: {}", issued.metadata.user_uuid);
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
