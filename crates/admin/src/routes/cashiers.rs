//! Cashier JSON API.
//!
//! ```text
//! GET    /cashiers       - List cashiers (never includes passwords)
//! POST   /cashiers       - Register a cashier, returning generated credentials once
//! DELETE /cashiers/{id}  - Remove a cashier
//! ```

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;

use nature_core::{CashierId, CashierInput, UserName};

use crate::error::AppError;
use crate::models::Cashier;
use crate::state::AppState;

const CASHIER_NOT_FOUND: &str = "Cashier not found";

/// Build the cashier API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cashiers", get(list_cashiers).post(create_cashier))
        .route("/cashiers/{id}", delete(delete_cashier))
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// A cashier as returned by the list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierResponse {
    pub id: CashierId,
    pub cashier_name: String,
    pub user_name: UserName,
    pub mobile: String,
    pub aadhaar: String,
    pub store_location: String,
    pub address: String,
    pub email: String,
    pub created_at: String,
}

impl From<Cashier> for CashierResponse {
    fn from(cashier: Cashier) -> Self {
        Self {
            id: cashier.id,
            cashier_name: cashier.cashier_name,
            user_name: cashier.user_name,
            mobile: cashier.mobile.into_inner(),
            aadhaar: cashier.aadhaar.into_inner(),
            store_location: cashier.store_location,
            address: cashier.address,
            email: cashier.email.into_inner(),
            created_at: cashier.created_at.to_rfc3339(),
        }
    }
}

/// Response for a newly registered cashier.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    pub id: CashierId,
    pub user_name: UserName,
    pub password: String,
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// List every cashier in store order.
#[instrument(skip(state))]
async fn list_cashiers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CashierResponse>>, AppError> {
    let cashiers = state.cashiers().list_cashiers().await?;
    Ok(Json(cashiers.into_iter().map(CashierResponse::from).collect()))
}

/// Register a cashier.
///
/// # Errors
///
/// Returns 400 with field violations for missing, malformed or duplicate
/// input, and 500 if the store fails.
#[instrument(skip(state, body))]
async fn create_cashier(
    State(state): State<AppState>,
    body: Result<Json<CashierInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let added = state.cashiers().add_cashier(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id: added.id,
            user_name: added.user_name,
            password: added.password.expose_secret().to_owned(),
        }),
    ))
}

/// Delete a cashier by ID.
///
/// An ID that does not parse is reported the same as an unknown one.
#[instrument(skip(state))]
async fn delete_cashier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id: CashierId = id
        .parse()
        .map_err(|_| AppError::NotFound(CASHIER_NOT_FOUND.to_string()))?;

    state.cashiers().delete_cashier(id).await?;
    Ok(Json(DeletedResponse { success: true }))
}
