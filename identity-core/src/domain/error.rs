use thiserror::Error;

/// Machine-checkable codes for classified business-rule failures.
///
/// The enum is closed on purpose: a new business case gets a new variant
/// here rather than a stringly-typed code at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainCode {
    NotFound,
}

impl DomainCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCode::NotFound => "NOT_FOUND",
        }
    }
}

impl std::fmt::Display for DomainCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared error taxonomy for the identity and profile core.
///
/// `Validation` is always a locally detected entity-invariant violation and
/// never wraps a remote failure. `Domain` carries a classified business-rule
/// code. `Unexpected` is the opaque case: a remote call failed for transport,
/// provider, or unexpected-shape reasons and callers must treat it as
/// retryable-unknown. Once an error is classified, nothing above the adapters
/// changes its kind.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{code}: {message}")]
    Domain { code: DomainCode, message: String },

    #[error("email confirmation required: please check your email and click the confirmation link")]
    EmailNotConfirmed,

    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::Domain {
            code: DomainCode::NotFound,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        AppError::Unexpected(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::Domain {
                code: DomainCode::NotFound,
                ..
            }
        )
    }
}

// Kind-level equality: payload messages are ignored so callers and tests can
// compare classifications without string matching.
impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Validation { field: a, .. },
                Self::Validation { field: b, .. },
            ) => a == b,
            (Self::Domain { code: a, .. }, Self::Domain { code: b, .. }) => a == b,
            (Self::EmailNotConfirmed, Self::EmailNotConfirmed) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}
