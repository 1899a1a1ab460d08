//! Test context for service-level integration tests.

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        orders::PgOrdersService, products::PgProductsService, users::PgUsersService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub users: PgUsersService,
    pub orders: PgOrdersService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            products: PgProductsService::new(db.clone()),
            users: PgUsersService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            auth: PgAuthService::new(db),
            db: test_db,
        }
    }
}
