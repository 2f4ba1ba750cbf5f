use serde::{Deserialize, Serialize};

/// Inbound user payload, shared by create and partial update.
///
/// A missing key and an explicit `null` both deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UserRequest {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
}
