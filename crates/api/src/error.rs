//! Maps repository errors onto HTTP responses.
//!
//! Every handler returns `Result<_, ApiError>`; the conversions here
//! decide the status code and the `{ "error", "message" }` body. Database
//! failures are logged and surfaced as an opaque 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use hydra_db::{
    CollaboratorError, InventoryError, ProductError, ReceivableError, SaleError, UserError,
};
use hydra_shared::AppError;

/// Wrapper that renders an [`AppError`] as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self.0 {
            AppError::Database(_) | AppError::Internal(_) => "An error occurred".to_string(),
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<SaleError> for ApiError {
    fn from(err: SaleError) -> Self {
        let app = match err {
            SaleError::Cart(e) => AppError::Validation(e.to_string()),
            SaleError::Validation(msg) => AppError::Validation(msg),
            SaleError::ProductNotFound(_) | SaleError::NotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            SaleError::InsufficientStock { .. } => AppError::BusinessRule(err.to_string()),
            SaleError::Status(e) => AppError::InvalidState(e.to_string()),
            SaleError::Database(e) => {
                error!(error = %e, "Sale operation failed");
                AppError::Database(e.to_string())
            }
        };
        Self(app)
    }
}

impl From<ReceivableError> for ApiError {
    fn from(err: ReceivableError) -> Self {
        let app = match err {
            ReceivableError::NotFound(_) => AppError::NotFound(err.to_string()),
            ReceivableError::Validation(msg) => AppError::Validation(msg),
            ReceivableError::Database(e) => {
                error!(error = %e, "Receivable operation failed");
                AppError::Database(e.to_string())
            }
        };
        Self(app)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let app = match err {
            InventoryError::Validation(msg) => AppError::Validation(msg),
            InventoryError::Database(e) => {
                error!(error = %e, "Inventory operation failed");
                AppError::Database(e.to_string())
            }
        };
        Self(app)
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        let app = match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::Validation(msg) => AppError::Validation(msg),
            ProductError::Database(e) => {
                error!(error = %e, "Product operation failed");
                AppError::Database(e.to_string())
            }
        };
        Self(app)
    }
}

impl From<CollaboratorError> for ApiError {
    fn from(err: CollaboratorError) -> Self {
        let app = match err {
            CollaboratorError::NotFound(_) => AppError::NotFound(err.to_string()),
            CollaboratorError::Validation(msg) => AppError::Validation(msg),
            CollaboratorError::Database(e) => {
                error!(error = %e, "Collaborator operation failed");
                AppError::Database(e.to_string())
            }
        };
        Self(app)
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let app = match err {
            UserError::NotFound => AppError::NotFound("user".to_string()),
            UserError::DuplicateUsername(_) => AppError::Conflict(err.to_string()),
            UserError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            UserError::Validation(msg) => AppError::Validation(msg),
            UserError::Password(e) => {
                error!(error = %e, "Password operation failed");
                AppError::Internal(e.to_string())
            }
            UserError::Database(e) => {
                error!(error = %e, "User operation failed");
                AppError::Database(e.to_string())
            }
        };
        Self(app)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        error!(error = %err, "Database operation failed");
        Self(AppError::Database(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_sale_errors_map_to_expected_status() {
        let not_found: ApiError = SaleError::NotFound(Uuid::new_v4()).into();
        assert_eq!(not_found.0.status_code(), 404);

        let oversell: ApiError = SaleError::InsufficientStock {
            name: "Espresso".to_string(),
            available: rust_decimal::Decimal::ZERO,
            requested: 3,
        }
        .into();
        assert_eq!(oversell.0.status_code(), 422);

        let validation: ApiError = SaleError::Validation("bad".to_string()).into();
        assert_eq!(validation.0.status_code(), 400);
    }

    #[test]
    fn test_user_errors_map_to_expected_status() {
        let unauthorized: ApiError = UserError::InvalidCredentials.into();
        assert_eq!(unauthorized.0.status_code(), 401);

        let conflict: ApiError = UserError::DuplicateUsername("maria".to_string()).into();
        assert_eq!(conflict.0.status_code(), 409);
    }

    #[test]
    fn test_database_errors_hide_details() {
        let err = ApiError(AppError::Database("connection reset".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
