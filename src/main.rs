use std::sync::Arc;

use salvo::{listener::TcpListener, Router, Server};
use tracing_subscriber::EnvFilter;

use user_service::{
    app::{transform::user::UserMapper, use_case::user::UserService},
    config::env_var,
    domain::repository::UserRepository,
    infra::{
        database::{connection, memory::MemoryUserRepository, migration, repository::PgUserRepository},
        router,
    },
};

fn app<R: UserRepository>(repository: R) -> Router {
    let mapper = UserMapper;
    let service = UserService::new(repository, mapper, env_var::get().whitespace_policy);
    router::app(Arc::new(service), mapper)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let env = env_var::get();
    let router = match &env.database {
        Some(database) => {
            let pool = connection::create_sqlx_pool(database)
                .await
                .expect("Expect to create a database pool with a open connection");
            migration::run(&pool)
                .await
                .expect("Expect to apply the database schema");
            app(PgUserRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_HOST not set, users are kept in memory");
            app(MemoryUserRepository::new())
        }
    };

    let address = format!("0.0.0.0:{}", env.port);
    tracing::info!("listening on {address}");
    let listener = TcpListener::bind(&address);
    Server::new(listener).serve(router).await;
}
