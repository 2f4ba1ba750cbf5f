use async_trait::async_trait;
use futures::stream::BoxStream;

use super::entity::User;
use crate::error::persistence::PersistenceError;

pub type UserStream<'a> = BoxStream<'a, Result<User, PersistenceError>>;

/// Document store holding [`User`] entities.
///
/// A missing document is `Ok(None)` and an empty collection is an empty
/// stream; neither is an error.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Store a new user, returning it with the id assigned by the store.
    async fn insert(&self, user: User) -> Result<User, PersistenceError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, PersistenceError>;

    /// Every stored user, in the order the store yields them.
    fn find_all(&self) -> UserStream<'_>;

    /// Upsert by id.
    async fn save(&self, user: User) -> Result<User, PersistenceError>;

    async fn find_and_remove(&self, id: &str) -> Result<Option<User>, PersistenceError>;
}
