use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use salvo::{
    http::{
        header::{HeaderValue, LOCATION},
        StatusCode,
    },
    writer::Json,
    Depot, FlowCtrl, Handler, Request, Response,
};

use crate::{
    app::{
        resource::{UserRequest, UserResponse},
        transform::user::UserMapper,
        use_case::user::UserService,
    },
    domain::repository::UserRepository,
    error::http::{BadRequest, RequestError},
    infra::router::USERS,
};

/// Unwrap a result or render its error payload and leave the handler.
macro_rules! map_res_err {
    ($result:expr, $req:ident, $response:ident) => {
        match $result {
            Err(err) => {
                $response.render(RequestError::new($req.uri().path(), err));
                return;
            }
            Ok(ok) => ok,
        }
    };
}

/// Location of a stored user, independent of how the create route was spelled.
fn user_location(id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("/{USERS}/{id}")).ok()
}

/// Extract the opaque user id from the `id` route param.
fn extract_id(req: &Request) -> String {
    req.params().get("id").cloned().unwrap_or_default()
}

pub struct CreateUserController<R> {
    service: Arc<UserService<R>>,
    mapper: UserMapper,
}

impl<R> CreateUserController<R> {
    pub fn new(service: Arc<UserService<R>>, mapper: UserMapper) -> Self {
        Self { service, mapper }
    }
}

#[async_trait]
impl<R: UserRepository> Handler for CreateUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<UserRequest, _> = req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, req, res);

        let user = map_res_err!(self.service.save(dto).await, req, res);

        if let Some(location) = user.id().as_deref().and_then(user_location) {
            res.headers_mut().insert(LOCATION, location);
        }
        res.set_status_code(StatusCode::CREATED);
        res.render(Json(self.mapper.to_response(user)));
    }
}

pub struct FindUserController<R> {
    service: Arc<UserService<R>>,
    mapper: UserMapper,
}

impl<R> FindUserController<R> {
    pub fn new(service: Arc<UserService<R>>, mapper: UserMapper) -> Self {
        Self { service, mapper }
    }
}

#[async_trait]
impl<R: UserRepository> Handler for FindUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);
        let user = map_res_err!(self.service.find_by_id(&id).await, req, res);

        res.set_status_code(StatusCode::OK);
        res.render(Json(self.mapper.to_response(user)));
    }
}

pub struct ListUsersController<R> {
    service: Arc<UserService<R>>,
    mapper: UserMapper,
}

impl<R> ListUsersController<R> {
    pub fn new(service: Arc<UserService<R>>, mapper: UserMapper) -> Self {
        Self { service, mapper }
    }
}

#[async_trait]
impl<R: UserRepository> Handler for ListUsersController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let mapper = self.mapper;
        let result: Result<Vec<UserResponse>, _> = self
            .service
            .find_all()
            .map_ok(|user| mapper.to_response(user))
            .try_collect()
            .await;
        let users = map_res_err!(result, req, res);

        res.set_status_code(StatusCode::OK);
        res.render(Json(users));
    }
}

pub struct UpdateUserController<R> {
    service: Arc<UserService<R>>,
    mapper: UserMapper,
}

impl<R> UpdateUserController<R> {
    pub fn new(service: Arc<UserService<R>>, mapper: UserMapper) -> Self {
        Self { service, mapper }
    }
}

#[async_trait]
impl<R: UserRepository> Handler for UpdateUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<UserRequest, _> = req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, req, res);

        let id = extract_id(req);
        let user = map_res_err!(self.service.update(&id, dto).await, req, res);

        res.set_status_code(StatusCode::OK);
        res.render(Json(self.mapper.to_response(user)));
    }
}

pub struct DeleteUserController<R> {
    service: Arc<UserService<R>>,
    mapper: UserMapper,
}

impl<R> DeleteUserController<R> {
    pub fn new(service: Arc<UserService<R>>, mapper: UserMapper) -> Self {
        Self { service, mapper }
    }
}

#[async_trait]
impl<R: UserRepository> Handler for DeleteUserController<R> {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);
        let user = map_res_err!(self.service.delete(&id).await, req, res);

        res.set_status_code(StatusCode::OK);
        res.render(Json(self.mapper.to_response(user)));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::user_location;

    #[test]
    fn location_uses_the_users_prefix() {
        let location = user_location("a7d63792").unwrap();

        assert_eq!(location.to_str().unwrap(), "/users/a7d63792");
    }
}
