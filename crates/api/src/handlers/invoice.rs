//! Handlers for invoices (admin-created).

use atelier_core::error::CoreError;
use atelier_db::models::invoice::{CreateInvoice, Invoice};
use atelier_db::repositories::{InvoiceRepo, ProjectRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/invoices (admin)
///
/// A duplicate invoice number hits `uq_invoices_number` and comes back
/// as 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<DataResponse<Invoice>>)> {
    if input.invoice_number.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "Invoice number is required",
        )));
    }
    if input.amount_cents <= 0 {
        return Err(AppError::Core(CoreError::validation(
            "Amount must be positive",
        )));
    }

    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", input.project_id)))?;

    let invoice = InvoiceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(invoice))))
}
