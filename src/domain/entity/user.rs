use super::state_ref;

/// Persisted user document.
///
/// The `id` is owned by the storage layer: it is `None` for an entity that was
/// never stored and is only ever filled in by [`User::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<String>,
    name: String,
    email: String,
    password: String,
}

impl User {
    state_ref!(id, Option<String>);
    state_ref!(name, String);
    state_ref!(email, String);
    state_ref!(password, String);

    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            id: None,
            name,
            email,
            password,
        }
    }

    pub fn restore(id: String, name: String, email: String, password: String) -> Self {
        Self {
            id: Some(id),
            name,
            email,
            password,
        }
    }

    /// Attach a storage assigned id, keeping the id already present if any.
    pub fn with_id(self, id: String) -> Self {
        Self {
            id: self.id.or(Some(id)),
            ..self
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub fn set_password(&mut self, password: String) {
        self.password = password;
    }
}
