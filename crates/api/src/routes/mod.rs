//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod auth;
pub mod collaborators;
pub mod health;
pub mod inventory;
pub mod products;
pub mod receivables;
pub mod sales;
pub mod settings;
pub mod users;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(products::routes())
        .merge(inventory::routes())
        .merge(sales::routes())
        .merge(receivables::routes())
        .merge(collaborators::routes())
        .merge(users::routes())
        .merge(settings::routes())
}
