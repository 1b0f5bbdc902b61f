//! Repository for the `invoices` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::invoice::{CreateInvoice, Invoice};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, invoice_number, amount_cents, due_date, file_url, created_at";

/// Provides operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice. Violating `uq_invoices_number` surfaces as a
    /// database error the API layer maps to 409.
    pub async fn create(pool: &PgPool, input: &CreateInvoice) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (project_id, invoice_number, amount_cents, due_date, file_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(input.project_id)
            .bind(&input.invoice_number)
            .bind(input.amount_cents)
            .bind(input.due_date)
            .bind(&input.file_url)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
