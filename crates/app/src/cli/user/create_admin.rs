use clap::Args;
use shopfront_app::{
    auth::Password,
    domain::users::{
        PgUsersService, UsersService, UsersServiceError,
        data::NewUser,
        records::UserUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Login name for the new administrator
    #[arg(long)]
    username: String,

    /// Optional address for order notifications
    #[arg(long)]
    email: Option<String>,

    /// Initial password
    #[arg(long, env = "SHOPFRONT_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgUsersService::new(db);

    let registered = service
        .register(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            password: Password::new(args.password),
        })
        .await
        .map_err(|error| match error {
            UsersServiceError::Validation(errors) => format!("invalid user: {errors}"),
            other => format!("failed to create user: {other}"),
        })?;

    let admin = service
        .set_admin(&registered.username, true)
        .await
        .map_err(|error| format!("failed to grant admin role: {error}"))?;

    println!("user_uuid: {}", admin.uuid);
    println!("username: {}", admin.username);
    println!("is_admin: {}", admin.is_admin);

    Ok(())
}
