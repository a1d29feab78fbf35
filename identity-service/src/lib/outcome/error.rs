use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Classification of a failure, used by the boundary to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    Unauthorized,
    Invalid,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Invalid => "invalid",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Error payload carried by a failed [`Outcome`](super::Outcome).
///
/// Holds a message, a classification and optionally the original error that
/// caused it. The cause is shared, so cloning an `ErrorInfo` never loses it,
/// and [`ErrorInfo::downcast_ref`] hands the original object back to callers.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    kind: ErrorKind,
    message: String,
    cause: Option<Cause>,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap an error, taking its `Display` output as the message.
    pub fn from_cause<E>(kind: ErrorKind, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: cause.to_string(),
            cause: Some(Arc::new(cause)),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Reclassify, keeping message and cause.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Borrow the original error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.cause.as_deref()?.downcast_ref::<E>()
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ErrorInfo {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl From<&str> for ErrorInfo {
    fn from(message: &str) -> Self {
        Self::internal(message)
    }
}

impl From<String> for ErrorInfo {
    fn from(message: String) -> Self {
        Self::internal(message)
    }
}

impl From<anyhow::Error> for ErrorInfo {
    fn from(err: anyhow::Error) -> Self {
        let message = err.to_string();
        let cause: Box<dyn Error + Send + Sync + 'static> = err.into();

        Self {
            kind: ErrorKind::Internal,
            message,
            cause: Some(Arc::from(cause)),
        }
    }
}
