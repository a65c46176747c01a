//! The application-wide error taxonomy.
//!
//! Repository crates carry their own `thiserror` enums; those convert into
//! [`AppError`] at the API boundary, which owns the HTTP status and wire
//! code for each class of failure.

use thiserror::Error;

/// Convenience alias for fallible operations that surface [`AppError`].
pub type AppResult<T> = Result<T, AppError>;

/// Every failure class the service reports to clients.
#[derive(Debug, Error)]
pub enum AppError {
    /// Credentials rejected.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request payload failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The record exists but its status forbids the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A business rule blocked the operation, e.g. insufficient stock.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// A uniqueness or concurrent-write conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The database rejected or aborted the operation.
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else; details stay server-side.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this failure class.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::InvalidState(_) | Self::Conflict(_) => 409,
            Self::BusinessRule(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for the response body.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample(code: &str) -> AppError {
        match code {
            "UNAUTHORIZED" => AppError::Unauthorized(String::new()),
            "NOT_FOUND" => AppError::NotFound(String::new()),
            "VALIDATION_ERROR" => AppError::Validation(String::new()),
            "INVALID_STATE" => AppError::InvalidState(String::new()),
            "BUSINESS_RULE_VIOLATION" => AppError::BusinessRule(String::new()),
            "CONFLICT" => AppError::Conflict(String::new()),
            "DATABASE_ERROR" => AppError::Database(String::new()),
            _ => AppError::Internal(String::new()),
        }
    }

    #[rstest]
    #[case("UNAUTHORIZED", 401)]
    #[case("NOT_FOUND", 404)]
    #[case("VALIDATION_ERROR", 400)]
    #[case("INVALID_STATE", 409)]
    #[case("BUSINESS_RULE_VIOLATION", 422)]
    #[case("CONFLICT", 409)]
    #[case("DATABASE_ERROR", 500)]
    #[case("INTERNAL_ERROR", 500)]
    fn status_and_code_stay_paired(#[case] code: &str, #[case] status: u16) {
        let err = sample(code);
        assert_eq!(err.error_code(), code);
        assert_eq!(err.status_code(), status);
    }

    #[test]
    fn display_carries_the_detail() {
        assert_eq!(
            AppError::NotFound("sale".into()).to_string(),
            "Not found: sale"
        );
        assert_eq!(
            AppError::InvalidState("already cancelled".into()).to_string(),
            "Invalid state: already cancelled"
        );
        assert_eq!(
            AppError::BusinessRule("insufficient stock".into()).to_string(),
            "Business rule violation: insufficient stock"
        );
    }
}
