//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use shopfront_app::auth::Actor;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_actor(&mut self, actor: Actor);

    /// The authenticated caller, if the request carried a valid token.
    fn actor(&self) -> Option<&Actor>;

    fn actor_or_401(&self) -> Result<&Actor, StatusError>;

    fn admin_or_403(&self) -> Result<&Actor, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.inject(actor);
    }

    fn actor(&self) -> Option<&Actor> {
        self.obtain::<Actor>().ok()
    }

    fn actor_or_401(&self) -> Result<&Actor, StatusError> {
        self.actor().ok_or_else(|| {
            StatusError::unauthorized().brief("Authentication credentials were not provided")
        })
    }

    fn admin_or_403(&self) -> Result<&Actor, StatusError> {
        let actor = self.actor_or_401()?;

        if actor.is_admin {
            Ok(actor)
        } else {
            Err(StatusError::forbidden()
                .brief("You do not have permission to perform this action"))
        }
    }
}
