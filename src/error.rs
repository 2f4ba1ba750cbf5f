use derive_more::Display;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Display)]
pub struct UnknownError(BoxedError);

impl std::error::Error for UnknownError {}

impl UnknownError {
    pub fn new(err: BoxedError) -> Self {
        Self(err)
    }
}

impl From<BoxedError> for UnknownError {
    fn from(err: BoxedError) -> Self {
        Self::new(err)
    }
}

impl From<sqlx::error::Error> for UnknownError {
    fn from(err: sqlx::error::Error) -> Self {
        Self::new(err.into())
    }
}

pub mod app {
    use derive_more::Display;
    use salvo::prelude::StatusError;

    use super::{
        http::{ErrorResponse, HttpError},
        persistence::PersistenceError,
        resource::{NotFoundError, ValidationError},
    };

    #[derive(Debug, Display)]
    pub enum ApplicationError {
        Validation(ValidationError),
        NotFound(NotFoundError),
        Persistence(PersistenceError),
    }

    impl std::error::Error for ApplicationError {}

    impl From<ValidationError> for ApplicationError {
        fn from(err: ValidationError) -> Self {
            Self::Validation(err)
        }
    }

    impl From<NotFoundError> for ApplicationError {
        fn from(err: NotFoundError) -> Self {
            Self::NotFound(err)
        }
    }

    impl From<PersistenceError> for ApplicationError {
        fn from(err: PersistenceError) -> Self {
            Self::Persistence(err)
        }
    }

    impl HttpError for ApplicationError {
        fn status(&self) -> StatusError {
            match self {
                ApplicationError::Validation(_) => StatusError::bad_request(),
                ApplicationError::NotFound(_) => StatusError::not_found(),
                ApplicationError::Persistence(_) => StatusError::internal_server_error(),
            }
        }

        fn into_response(self, path: &str) -> ErrorResponse {
            let status = self.status();
            match self {
                ApplicationError::Validation(err) => ErrorResponse::new(
                    path,
                    &status,
                    ValidationError::TITLE,
                    ValidationError::MESSAGE,
                )
                .with_fields(err.fields),
                ApplicationError::NotFound(err) => {
                    ErrorResponse::new(path, &status, &err.reason, &err.reason)
                }
                ApplicationError::Persistence(err) => {
                    tracing::error!("storage failure on {path}: {err}");
                    ErrorResponse::new(
                        path,
                        &status,
                        &status.name,
                        PersistenceError::MESSAGE,
                    )
                }
            }
        }
    }
}

pub mod persistence {
    use std::io;

    use derive_more::Display;

    use super::UnknownError;

    pub type SqlState = String;

    #[derive(Debug, Display)]
    pub enum PersistenceError {
        #[display(fmt = "database persistence error: SQLSTATE {_0:?}")]
        Database(Option<SqlState>),
        #[display(fmt = "persistence layer connection error: {_0}")]
        Connection(io::Error),
        #[display(fmt = "persistence layer timed out acquiring a connection")]
        Timeout,
        #[display(fmt = "PersistenceError decoding data")]
        DecodeData,
        #[display(fmt = "PersistenceError data migration")]
        DataMigration,
        #[display(fmt = "unknown persistence error: {_0}")]
        Unknown(UnknownError),
    }

    impl PersistenceError {
        pub const MESSAGE: &'static str = "Unexpected error on storage";
    }

    impl std::error::Error for PersistenceError {}

    type SqlxError = sqlx::error::Error;

    impl From<SqlxError> for PersistenceError {
        fn from(err: SqlxError) -> Self {
            match err {
                SqlxError::Configuration(_) => {
                    Self::Connection(io::ErrorKind::InvalidInput.into())
                }
                SqlxError::Database(db) => Self::Database(db.code().map(|code| code.into())),
                SqlxError::Io(io) => Self::Connection(io),
                SqlxError::Tls(_) => Self::Connection(io::ErrorKind::ConnectionRefused.into()),
                SqlxError::Protocol(msg) => {
                    Self::Connection(io::Error::new(io::ErrorKind::InvalidData, msg))
                }
                SqlxError::TypeNotFound { .. } => Self::DecodeData,
                SqlxError::ColumnIndexOutOfBounds { .. } => Self::DecodeData,
                SqlxError::ColumnNotFound(_) => Self::DecodeData,
                SqlxError::ColumnDecode { .. } => Self::DecodeData,
                SqlxError::Decode(_) => Self::DecodeData,
                SqlxError::PoolTimedOut => Self::Timeout,
                SqlxError::PoolClosed => Self::Connection(io::ErrorKind::NotConnected.into()),
                SqlxError::Migrate(_) => Self::DataMigration,
                _ => Self::Unknown(err.into()),
            }
        }
    }
}

pub mod resource {
    use derive_more::Display;
    use serde::Serialize;

    #[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ValidationErrorKind {
        /// Missing, empty or whitespace only value.
        #[display(fmt = "blank")]
        Blank,
        /// Leading or trailing whitespace.
        #[display(fmt = "whitespace")]
        Whitespace,
        /// Trimmed length outside the inclusive bounds.
        #[display(fmt = "size({min}, {max})")]
        Size { min: usize, max: usize },
        /// Not shaped as `local@domain`.
        #[display(fmt = "email")]
        Email,
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq, Serialize)]
    #[display(fmt = "{field_name}: {message}")]
    pub struct ValidationFieldError {
        #[serde(rename = "fieldName")]
        pub field_name: &'static str,
        pub message: &'static str,
        #[serde(skip)]
        pub kind: ValidationErrorKind,
    }

    impl ValidationFieldError {
        pub fn new(
            field_name: &'static str,
            kind: ValidationErrorKind,
            message: &'static str,
        ) -> Self {
            Self {
                field_name,
                message,
                kind,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ValidationError {
        /// Invalid resource fields, in field declaration order
        pub fields: Vec<ValidationFieldError>,
    }

    impl ValidationError {
        pub const TITLE: &'static str = "Validation error";
        pub const MESSAGE: &'static str = "Error on validation attributes";

        pub fn new(fields: Vec<ValidationFieldError>) -> Self {
            Self { fields }
        }
    }

    impl std::error::Error for ValidationError {}

    impl std::fmt::Display for ValidationError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("Invalid resource, fields {:?}", self.fields))
        }
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    #[display(fmt = "{reason}")]
    pub struct NotFoundError {
        pub reason: String,
    }

    impl NotFoundError {
        pub const REASON: &'static str = "Not Found";

        pub fn new(reason: impl Into<String>) -> Self {
            Self {
                reason: reason.into(),
            }
        }
    }

    impl Default for NotFoundError {
        fn default() -> Self {
            Self::new(Self::REASON)
        }
    }

    impl std::error::Error for NotFoundError {}
}

pub mod http {
    use derive_more::{Display, Error};
    use salvo::{http::ParseError, prelude::StatusError, writer::Json, Piece, Response};
    use serde::{Deserialize, Serialize};

    use super::resource::ValidationFieldError;

    /// A failure that can be reported back over HTTP.
    pub trait HttpError {
        fn status(&self) -> StatusError;

        /// Translate the failure into the payload sent back for `path`.
        fn into_response(self, path: &str) -> ErrorResponse;
    }

    /// An [`HttpError`] paired with the path of the request that raised it.
    #[derive(Debug)]
    pub struct RequestError<E> {
        pub path: String,
        pub err: E,
    }

    impl<E> RequestError<E> {
        pub fn new(path: &str, err: E) -> Self {
            Self {
                path: path.into(),
                err,
            }
        }
    }

    impl<E: HttpError> Piece for RequestError<E> {
        fn render(self, res: &mut Response) {
            let status = self.err.status();
            res.set_status_code(status.code);
            res.render(Json(self.err.into_response(&self.path)));
        }
    }

    #[derive(Debug, Display, Clone, Error, Serialize, Deserialize)]
    pub enum BadRequest {
        InvalidContent,
    }

    impl BadRequest {
        pub const MESSAGE: &'static str = "Invalid request content";
    }

    impl HttpError for BadRequest {
        fn status(&self) -> StatusError {
            StatusError::bad_request()
        }

        fn into_response(self, path: &str) -> ErrorResponse {
            let status = self.status();
            ErrorResponse::new(path, &status, &status.name, Self::MESSAGE)
        }
    }

    impl From<ParseError> for BadRequest {
        fn from(_: ParseError) -> Self {
            BadRequest::InvalidContent
        }
    }

    #[derive(Debug, Display, Clone, Serialize)]
    #[display(fmt = "Response error: {status} {error}, {message}")]
    pub struct ErrorResponse {
        pub path: String,
        pub status: u16,
        pub error: String,
        pub message: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub errors: Vec<ValidationFieldError>,
    }

    impl ErrorResponse {
        pub fn new(path: &str, status: &StatusError, error: &str, message: &str) -> Self {
            Self {
                path: path.into(),
                status: status.code.as_u16(),
                error: error.into(),
                message: message.into(),
                errors: Vec::new(),
            }
        }

        pub fn with_fields(mut self, fields: Vec<ValidationFieldError>) -> Self {
            self.errors = fields;
            self
        }
    }

}
