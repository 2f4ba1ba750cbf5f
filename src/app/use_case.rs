pub mod user {
    use futures::{stream::BoxStream, StreamExt, TryStreamExt};

    use crate::{
        app::{
            resource::UserRequest,
            transform::user::UserMapper,
            validation::{self, ValidationMode, WhitespacePolicy},
        },
        domain::{entity::User, repository::UserRepository},
        error::{
            app::ApplicationError,
            resource::{NotFoundError, ValidationError},
        },
    };

    /// The five user operations over a document store.
    pub struct UserService<R> {
        repository: R,
        mapper: UserMapper,
        policy: WhitespacePolicy,
    }

    impl<R: UserRepository> UserService<R> {
        pub fn new(repository: R, mapper: UserMapper, policy: WhitespacePolicy) -> Self {
            Self {
                repository,
                mapper,
                policy,
            }
        }

        fn validate(
            &self,
            request: UserRequest,
            mode: ValidationMode,
        ) -> Result<UserRequest, ValidationError> {
            validation::user_request(request, mode, self.policy).map_err(|fields| {
                tracing::warn!(?mode, "rejected user request: {fields:?}");
                ValidationError::new(fields)
            })
        }

        pub async fn save(&self, request: UserRequest) -> Result<User, ApplicationError> {
            let request = self.validate(request, ValidationMode::Create)?;
            let user = self.repository.insert(self.mapper.to_entity(request)).await?;
            tracing::info!(id = ?user.id(), "user created");
            Ok(user)
        }

        pub async fn find_by_id(&self, id: &str) -> Result<User, ApplicationError> {
            tracing::debug!(id, "find user");
            self.repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| NotFoundError::default().into())
        }

        /// Stream every user; an empty store yields an empty stream.
        pub fn find_all(&self) -> BoxStream<'_, Result<User, ApplicationError>> {
            tracing::debug!("list users");
            self.repository
                .find_all()
                .map_err(ApplicationError::from)
                .boxed()
        }

        pub async fn update(&self, id: &str, request: UserRequest) -> Result<User, ApplicationError> {
            let request = self.validate(request, ValidationMode::Update)?;
            let entity = self.find_by_id(id).await?;
            let user = self.repository.save(self.mapper.merge(request, entity)).await?;
            tracing::info!(id, "user updated");
            Ok(user)
        }

        pub async fn delete(&self, id: &str) -> Result<User, ApplicationError> {
            let user = self
                .repository
                .find_and_remove(id)
                .await?
                .ok_or_else(NotFoundError::default)?;
            tracing::info!(id, "user deleted");
            Ok(user)
        }
    }

}
