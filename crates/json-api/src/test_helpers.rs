//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use shopfront_app::{
    auth::{Actor, MockAuthService},
    context::AppContext,
    domain::{
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{MockUsersService, records::UserUuid},
    },
    notifications::MockOrderNotifier,
};

use crate::state::State;

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// One mock per service. Any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct MockServices {
    pub(crate) products: MockProductsService,
    pub(crate) users: MockUsersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
    pub(crate) notifier: MockOrderNotifier,
}

impl MockServices {
    pub(crate) fn with_products(products: MockProductsService) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub(crate) fn with_orders(orders: MockOrdersService) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    pub(crate) fn with_users(users: MockUsersService) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            users: Arc::new(self.users),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
            notifier: Arc::new(self.notifier),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

/// Build a service around `route`, authenticated as `actor` when given.
pub(crate) fn service_as(actor: Option<Actor>, mocks: MockServices, route: Router) -> Service {
    let mut router = Router::new().hoop(inject(mocks.into_state()));

    if let Some(actor) = actor {
        router = router.hoop(inject(actor));
    }

    Service::new(router.push(route))
}

pub(crate) fn make_actor(is_admin: bool) -> Actor {
    Actor {
        user: TEST_USER_UUID,
        username: "alice".to_string(),
        is_admin,
        email: Some("alice@example.com".to_string()),
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Desk Lamp".to_string(),
        description: "Brass, with a linen shade".to_string(),
        price: 10_00,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An order holding two lamps at 10.00 and one bulb at 5.00.
pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        username: "alice".to_string(),
        status: OrderStatus::Pending,
        items: vec![
            OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: ProductUuid::new(),
                product_name: "Desk Lamp".to_string(),
                price: 10_00,
                quantity: 2,
            },
            OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: ProductUuid::new(),
                product_name: "Bulb".to_string(),
                price: 5_00,
                quantity: 1,
            },
        ],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
