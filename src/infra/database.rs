pub mod connection {
    use std::time::Duration;

    use crate::config::env_var::DatabaseVar;

    pub async fn create_sqlx_pool(database: &DatabaseVar) -> Result<sqlx::PgPool, sqlx::Error> {
        sqlx::postgres::PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_millis(1000))
            .idle_timeout(Duration::from_millis(1000 * 30))
            .max_lifetime(Duration::from_millis(1000 * 10))
            .connect(&database.url())
            .await
    }
}

pub mod migration {
    use sqlx::PgPool;

    use crate::error::persistence::PersistenceError;

    const SCHEMA: &str = include_str!("../../dbschema.sql");

    /// Apply the idempotent schema statements in a single transaction.
    pub async fn run(pool: &PgPool) -> Result<(), PersistenceError> {
        let mut trx = pool.begin().await?;
        for sttm in SCHEMA.split(';').filter(|sttm| !sttm.trim().is_empty()) {
            sqlx::query(sttm).execute(&mut trx).await?;
        }
        trx.commit().await?;
        Ok(())
    }
}

pub mod repository {
    use async_trait::async_trait;
    use futures::{StreamExt, TryStreamExt};
    use sqlx::{postgres::PgRow, FromRow, PgPool, Row};
    use uuid::Uuid;

    use crate::{
        domain::{
            entity::User,
            repository::{UserRepository, UserStream},
        },
        error::persistence::PersistenceError,
    };

    impl<'r> FromRow<'r, PgRow> for User {
        fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self::restore(
                row.try_get("id")?,
                row.try_get("name")?,
                row.try_get("email")?,
                row.try_get("password")?,
            ))
        }
    }

    #[derive(Debug, Clone)]
    pub struct PgUserRepository {
        pool: PgPool,
    }

    impl PgUserRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl UserRepository for PgUserRepository {
        async fn insert(&self, user: User) -> Result<User, PersistenceError> {
            let user = user.with_id(Uuid::new_v4().to_string());

            let inserted = sqlx::query_as::<_, User>(concat!(
                "INSERT INTO app.user (id, name, email, password) VALUES ($1, $2, $3, $4) ",
                "RETURNING id, name, email, password",
            ))
            .bind(user.id())
            .bind(user.name())
            .bind(user.email())
            .bind(user.password())
            .fetch_one(&self.pool)
            .await?;

            Ok(inserted)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<User>, PersistenceError> {
            let user = sqlx::query_as::<_, User>(
                "SELECT id, name, email, password FROM app.user WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(user)
        }

        fn find_all(&self) -> UserStream<'_> {
            sqlx::query_as::<_, User>("SELECT id, name, email, password FROM app.user")
                .fetch(&self.pool)
                .map_err(PersistenceError::from)
                .boxed()
        }

        async fn save(&self, user: User) -> Result<User, PersistenceError> {
            let user = user.with_id(Uuid::new_v4().to_string());

            let saved = sqlx::query_as::<_, User>(concat!(
                "INSERT INTO app.user (id, name, email, password) VALUES ($1, $2, $3, $4) ",
                "ON CONFLICT (id) DO UPDATE SET ",
                "name = EXCLUDED.name, email = EXCLUDED.email, password = EXCLUDED.password ",
                "RETURNING id, name, email, password",
            ))
            .bind(user.id())
            .bind(user.name())
            .bind(user.email())
            .bind(user.password())
            .fetch_one(&self.pool)
            .await?;

            Ok(saved)
        }

        async fn find_and_remove(&self, id: &str) -> Result<Option<User>, PersistenceError> {
            let removed = sqlx::query_as::<_, User>(
                "DELETE FROM app.user WHERE id = $1 RETURNING id, name, email, password",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(removed)
        }
    }
}

pub mod memory {
    use async_trait::async_trait;
    use futures::{stream, StreamExt};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use crate::{
        domain::{
            entity::User,
            repository::{UserRepository, UserStream},
        },
        error::persistence::PersistenceError,
    };

    /// Process local store keeping users in insertion order.
    #[derive(Debug, Default)]
    pub struct MemoryUserRepository {
        users: RwLock<Vec<User>>,
    }

    impl MemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn has_id(user: &User, id: &str) -> bool {
        user.id().as_deref() == Some(id)
    }

    #[async_trait]
    impl UserRepository for MemoryUserRepository {
        async fn insert(&self, user: User) -> Result<User, PersistenceError> {
            let user = user.with_id(Uuid::new_v4().to_string());
            self.users.write().await.push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<User>, PersistenceError> {
            let users = self.users.read().await;
            Ok(users.iter().find(|user| has_id(user, id)).cloned())
        }

        fn find_all(&self) -> UserStream<'_> {
            stream::once(async move { self.users.read().await.clone() })
                .flat_map(|users| stream::iter(users.into_iter().map(Ok)))
                .boxed()
        }

        async fn save(&self, user: User) -> Result<User, PersistenceError> {
            let user = user.with_id(Uuid::new_v4().to_string());
            let mut users = self.users.write().await;

            match users.iter().position(|stored| stored.id() == user.id()) {
                Some(index) => users[index] = user.clone(),
                None => users.push(user.clone()),
            }

            Ok(user)
        }

        async fn find_and_remove(&self, id: &str) -> Result<Option<User>, PersistenceError> {
            let mut users = self.users.write().await;
            let removed = users
                .iter()
                .position(|user| has_id(user, id))
                .map(|index| users.remove(index));
            Ok(removed)
        }
    }

    #[cfg(test)]
    mod tests {
        use futures::TryStreamExt;
        use pretty_assertions::assert_eq;

        use super::*;

        fn lincon() -> User {
            User::new("Lincon".into(), "lincon@google.com".into(), "123".into())
        }

        #[tokio::test]
        async fn insert_assigns_distinct_ids() {
            let repository = MemoryUserRepository::new();

            let first = repository.insert(lincon()).await.unwrap();
            let second = repository.insert(lincon()).await.unwrap();

            assert!(first.id().is_some());
            assert_ne!(first.id(), second.id());
        }

        #[tokio::test]
        async fn save_replaces_in_place() {
            let repository = MemoryUserRepository::new();
            let first = repository.insert(lincon()).await.unwrap();
            let second = repository.insert(lincon()).await.unwrap();

            let mut changed = first.clone();
            changed.set_name("Abraham".into());
            repository.save(changed.clone()).await.unwrap();

            let all: Vec<User> = repository.find_all().try_collect().await.unwrap();
            assert_eq!(all, vec![changed, second]);
        }

        #[tokio::test]
        async fn find_and_remove_missing_is_none() {
            let repository = MemoryUserRepository::new();

            assert_eq!(repository.find_and_remove("123456").await.unwrap(), None);
        }
    }
}
