use thiserror::Error;

/// Failures surfaced by the service clients.
///
/// `Display` strings are what the user sees, so they follow the
/// messages the web client showed: HTTP failures as
/// `HTTP error! status: <code>`, structured API errors verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Login(String),

    #[error("Failed to export PDF")]
    Export { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status }
            | ApiError::Api { status, .. }
            | ApiError::Export { status } => Some(*status),
            ApiError::Unauthorized => Some(401),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Client-side form validation failure; the message is shown inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FormError(pub String);

impl FormError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// What a screen action can fail with: a local check or the remote call.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
