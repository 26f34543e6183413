use thiserror::Error;

/// Outward classification of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, missing business entity or a forbidden self-removal
    BadRequest,
    /// Duplicate username
    Conflict,
    /// Bad credentials, unusable token or vanished account
    Unauthorized,
    /// Hashing, signing, configuration or store failure
    Internal,
}

impl ErrorKind {
    /// Status code the HTTP boundary renders for this kind
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Semantic kind used to pick the outward status
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Internal { .. } | Self::Storage { .. } | Self::Configuration { .. } => {
                ErrorKind::Internal
            }
        }
    }

    /// Display message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::Internal { message }
            | Self::Storage { message }
            | Self::Configuration { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_error() {
        let error = DomainError::bad_request("user not found");
        assert_eq!(error.to_string(), "Bad request: user not found");
        assert_eq!(error.message(), "user not found");
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("user already exists");
        assert_eq!(error.to_string(), "Conflict: user already exists");
        assert_eq!(error.kind().status_code(), 409);
    }

    #[test]
    fn test_infrastructure_errors_classify_as_internal() {
        assert_eq!(DomainError::storage("down").kind(), ErrorKind::Internal);
        assert_eq!(DomainError::configuration("no secret").kind(), ErrorKind::Internal);
        assert_eq!(DomainError::internal("boom").kind().status_code(), 500);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
    }
}
