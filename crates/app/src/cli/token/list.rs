use clap::Args;
use shopfront_app::auth::PgAuthService;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Only list tokens owned by this user
    #[arg(long)]
    username: Option<String>,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let tokens = PgAuthService::new(db)
        .list_api_tokens(args.username.as_deref())
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found");
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("user_uuid: {}", token.user_uuid);
        println!("created_at: {}", token.created_at);
        println!(
            "last_used_at: {}",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
