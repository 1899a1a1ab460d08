//! Test Helpers

use crate::{
    auth::Password,
    domain::{
        orders::{
            OrdersService, OrdersServiceError,
            data::{NewOrder, NewOrderItem},
            records::{OrderRecord, OrderUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn register_user(
    ctx: &TestContext,
    username: &str,
    password: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .register(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: Some(format!("{username}@example.com")),
            password: Password::new(password),
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: i64,
    stock: i64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: String::new(),
            price,
            stock,
        })
        .await
}

pub(crate) async fn create_order(
    ctx: &TestContext,
    user: UserUuid,
    items: &[(ProductUuid, i64)],
) -> Result<OrderRecord, OrdersServiceError> {
    ctx.orders
        .create_order(
            user,
            NewOrder {
                uuid: OrderUuid::new(),
                items: items
                    .iter()
                    .map(|&(product_uuid, quantity)| NewOrderItem {
                        product_uuid,
                        quantity,
                    })
                    .collect(),
            },
        )
        .await
}
