pub mod controller;
pub mod database;

pub mod router {
    use std::sync::Arc;

    use salvo::{logging::Logger, Router};

    use super::controller::*;
    use crate::{
        app::{transform::user::UserMapper, use_case::user::UserService},
        domain::repository::UserRepository,
    };

    pub const USERS: &str = "users";

    pub fn app<R: UserRepository>(service: Arc<UserService<R>>, mapper: UserMapper) -> Router {
        Router::new().push(users(service, mapper)).hoop(Logger)
    }

    pub fn users<R: UserRepository>(service: Arc<UserService<R>>, mapper: UserMapper) -> Router {
        Router::with_path(USERS)
            .get(ListUsersController::new(service.clone(), mapper))
            .post(CreateUserController::new(service.clone(), mapper))
            .push(
                Router::with_path("<id>")
                    .get(FindUserController::new(service.clone(), mapper))
                    .patch(UpdateUserController::new(service.clone(), mapper))
                    .delete(DeleteUserController::new(service, mapper)),
            )
    }
}
