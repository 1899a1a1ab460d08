//! App Context

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
    notifications::{LogMailer, OrderNotifier, QueuedNotifier},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Every service the application needs, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub users: Arc<dyn UsersService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub notifier: Arc<dyn OrderNotifier>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Spawns the notification worker on the current runtime and returns its
    /// handle alongside the context.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(
        url: &str,
        run_migrations: bool,
    ) -> Result<(Self, JoinHandle<()>), AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let (notifier, worker) = QueuedNotifier::spawn(Arc::new(LogMailer));

        Ok((Self::from_db(Db::new(pool), Arc::new(notifier)), worker))
    }

    /// Build application context over an existing database handle.
    #[must_use]
    pub fn from_db(db: Db, notifier: Arc<dyn OrderNotifier>) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db)),
            notifier,
        }
    }
}
