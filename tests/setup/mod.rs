#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::{stream, StreamExt};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use salvo::Service;
use url::Url;
use user_service::{
    app::{transform::user::UserMapper, use_case::user::UserService, validation::WhitespacePolicy},
    domain::{
        entity::User,
        repository::{UserRepository, UserStream},
    },
    error::persistence::PersistenceError,
    infra::{database::memory::MemoryUserRepository, router},
};

pub const TEST_URL: &str = "http://127.0.0.1:5800";

/// In-process service backed by an empty in-memory store.
pub fn memory_service(policy: WhitespacePolicy) -> Service {
    let mapper = UserMapper;
    let service = UserService::new(MemoryUserRepository::new(), mapper, policy);
    Service::new(router::app(Arc::new(service), mapper))
}

/// Store whose every call fails as an unreachable database would.
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn insert(&self, _: User) -> Result<User, PersistenceError> {
        Err(PersistenceError::Timeout)
    }

    async fn find_by_id(&self, _: &str) -> Result<Option<User>, PersistenceError> {
        Err(PersistenceError::Timeout)
    }

    fn find_all(&self) -> UserStream<'_> {
        stream::once(async { Err(PersistenceError::Timeout) }).boxed()
    }

    async fn save(&self, _: User) -> Result<User, PersistenceError> {
        Err(PersistenceError::Timeout)
    }

    async fn find_and_remove(&self, _: &str) -> Result<Option<User>, PersistenceError> {
        Err(PersistenceError::Timeout)
    }
}

pub fn failing_service() -> Service {
    let mapper = UserMapper;
    let service = UserService::new(FailingUserRepository, mapper, WhitespacePolicy::Reject);
    Service::new(router::app(Arc::new(service), mapper))
}

pub fn test_url(path: &str) -> String {
    format!("{TEST_URL}{path}")
}

pub fn setup_live_test() -> (Client, Url) {
    dotenv::dotenv().ok();
    (create_client(), service_url())
}

fn service_url() -> Url {
    let port: u16 = std::env::var("PORT")
        .unwrap()
        .parse()
        .expect("Invalid PORT");
    Url::parse(format!("http://localhost:{port}").as_str()).unwrap()
}

fn create_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.append("accept", HeaderValue::from_static("application/json"));

    let keep_alive = 1000 * 60 * 60; // 1 hours
    let connect_timeout = 1000 * 5; // 5 sec
    let timeout = 1000 * 10; // 10 sec

    reqwest::Client::builder()
        .tcp_keepalive(Duration::from_millis(keep_alive))
        .connect_timeout(Duration::from_millis(connect_timeout))
        .timeout(Duration::from_millis(timeout))
        .pool_max_idle_per_host(5)
        .default_headers(headers)
        .brotli(true)
        .gzip(true)
        .build()
        .expect("Expect to create a http client")
}
