pub mod resource;
pub mod use_case;
pub mod validation;

pub mod transform {
    pub mod user {
        use crate::{
            app::resource::{UserRequest, UserResponse},
            domain::entity::User,
        };

        /// Conversions between user payloads and the stored entity.
        ///
        /// Never touches the entity id: a fresh entity has none and a merged
        /// one keeps what the store assigned.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct UserMapper;

        impl UserMapper {
            /// Build an unsaved entity from a validated create request.
            ///
            /// Absent fields, which validation never lets through on create,
            /// become empty strings.
            pub fn to_entity(&self, request: UserRequest) -> User {
                User::new(
                    request.name.unwrap_or_default(),
                    request.email.unwrap_or_default(),
                    request.password.unwrap_or_default(),
                )
            }

            /// Overlay the fields present in `request` onto `entity`.
            pub fn merge(&self, request: UserRequest, mut entity: User) -> User {
                if let Some(name) = request.name {
                    entity.set_name(name);
                }
                if let Some(email) = request.email {
                    entity.set_email(email);
                }
                if let Some(password) = request.password {
                    entity.set_password(password);
                }
                entity
            }

            pub fn to_response(&self, entity: User) -> UserResponse {
                UserResponse::from(entity)
            }
        }

        impl From<User> for UserResponse {
            fn from(user: User) -> Self {
                Self {
                    id: user.id().clone(),
                    name: user.name().clone(),
                    email: user.email().clone(),
                    password: user.password().clone(),
                }
            }
        }

        #[cfg(test)]
        mod tests {
            use pretty_assertions::assert_eq;

            use super::*;

            fn stored() -> User {
                User::restore(
                    "123456".into(),
                    "Lincon".into(),
                    "lincon@google.com".into(),
                    "123".into(),
                )
            }

            #[test]
            fn to_entity_leaves_id_unset() {
                let request = UserRequest::new("Lincon", "lincon@google.com", "123");

                let user = UserMapper.to_entity(request);

                assert_eq!(user, User::new("Lincon".into(), "lincon@google.com".into(), "123".into()));
            }

            #[test]
            fn projection_preserves_fields() {
                let request = UserRequest::new("Lincon", "lincon@google.com", "123");

                let response = UserMapper.to_response(UserMapper.to_entity(request));

                assert_eq!(
                    response,
                    UserResponse {
                        id: None,
                        name: "Lincon".into(),
                        email: "lincon@google.com".into(),
                        password: "123".into(),
                    }
                );
            }

            #[test]
            fn merge_only_overlays_present_fields() {
                let request = UserRequest {
                    name: Some("Abraham".into()),
                    ..Default::default()
                };

                let merged = UserMapper.merge(request, stored());

                assert_eq!(
                    merged,
                    User::restore(
                        "123456".into(),
                        "Abraham".into(),
                        "lincon@google.com".into(),
                        "123".into(),
                    )
                );
            }

            #[test]
            fn merge_with_empty_request_is_identity() {
                assert_eq!(UserMapper.merge(UserRequest::default(), stored()), stored());
            }

            #[test]
            fn response_carries_stored_id() {
                let response = UserMapper.to_response(stored());

                assert_eq!(response.id.as_deref(), Some("123456"));
                assert_eq!(response.password, "123");
            }
        }
    }
}
