//! Invoice entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An invoice row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub project_id: DbId,
    pub invoice_number: String,
    /// Amount in cents; avoids floating-point money.
    pub amount_cents: i64,
    pub due_date: Timestamp,
    pub file_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating an invoice (admin).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub project_id: DbId,
    pub invoice_number: String,
    pub amount_cents: i64,
    pub due_date: Timestamp,
    pub file_url: Option<String>,
}
