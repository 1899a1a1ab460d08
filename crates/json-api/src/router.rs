//! App Router

use salvo::Router;

use crate::{
    accounts,
    auth::{authenticate, require_actor, require_admin},
    orders, products,
};

/// Every resource route. Bearer tokens are resolved for all of them; the
/// `require_*` hoops then gate what each caller may reach.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(authenticate)
        .push(products_router())
        .push(accounts_router())
        .push(orders_router())
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("info").get(products::info::handler))
        .push(
            Router::with_path("{product}")
                .get(products::get::handler)
                .push(
                    Router::new()
                        .hoop(require_admin)
                        .put(products::update::handler)
                        .patch(products::update::patch_handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::new()
                .hoop(require_admin)
                .post(products::create::handler),
        )
}

fn accounts_router() -> Router {
    Router::with_path("account")
        .post(accounts::create::handler)
        .push(Router::with_path("tokens").post(accounts::tokens::handler))
        .push(
            Router::new()
                .hoop(require_actor)
                .get(accounts::index::handler),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .hoop(require_actor)
        .get(orders::index::handler)
        .post(orders::create::handler)
        .push(
            Router::with_path("{order}")
                .get(orders::get::handler)
                .push(
                    Router::new()
                        .hoop(require_admin)
                        .put(orders::update::handler)
                        .patch(orders::update::handler)
                        .delete(orders::delete::handler),
                ),
        )
}
