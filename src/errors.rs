use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures raised while editing details.
#[derive(Error, Debug)]
pub enum DetailError {
    /// The bound control, or the stored value, is not the type the
    /// editable works with. This means an editable was paired with the
    /// wrong control, or the item was written by something else.
    #[error("type mismatch on `{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid path `{0}`")]
    InvalidPath(String),

    #[error("no definition registered for `{0}`")]
    UnknownDefinition(String),

    #[error("no editable named `{0}`")]
    UnknownEditable(String),

    #[error("`{0}` is registered more than once")]
    DuplicateEditable(String),

    #[error("no item with id {0}")]
    ItemNotFound(String),

    #[error("rejected import of item {item}: {source}")]
    InvalidImport {
        item: String,
        #[source]
        source: Box<DetailError>,
    },

    #[error("cannot read `{value}` posted for `{field}`")]
    InvalidForm { field: String, value: String },

    #[error("failed to write detail")]
    Write(#[from] std::fmt::Error),
}

#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<DetailError>() {
            Some(DetailError::ItemNotFound(_))
            | Some(DetailError::UnknownDefinition(_)) => StatusCode::NOT_FOUND,
            Some(DetailError::InvalidPath(_))
            | Some(DetailError::InvalidImport { .. })
            | Some(DetailError::InvalidForm { .. }) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
            (status, "Something went wrong").into_response()
        } else {
            tracing::warn!("{}", self.0);
            (status, ammonia::clean_text(&self.0.to_string())).into_response()
        }
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// (or any error anyhow can absorb, like `DetailError`) to turn them into
// `Result<_, ServerError>`.
impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
