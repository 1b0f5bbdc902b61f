//! Best-effort project activity recorder.
//!
//! Mutating handlers call [`ActivityRecorder::record`] after a successful
//! write. The append runs on a detached task against an [`ActivitySink`],
//! so a slow or failing audit trail can never delay or fail the mutation
//! itself. Failures are logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::activity::ActivityKind;
use atelier_core::types::DbId;
use atelier_db::models::activity::NewActivity;
use atelier_db::repositories::ActivityRepo;
use atelier_db::DbPool;

/// Destination for activity records.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    async fn append(&self, input: NewActivity) -> Result<(), sqlx::Error>;
}

/// Writes activity records to the `activities` table.
pub struct PgActivitySink {
    pool: DbPool,
}

impl PgActivitySink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivitySink for PgActivitySink {
    async fn append(&self, input: NewActivity) -> Result<(), sqlx::Error> {
        ActivityRepo::insert(&self.pool, &input).await?;
        Ok(())
    }
}

/// Fire-and-forget recorder handed to handlers through [`crate::state::AppState`].
#[derive(Clone)]
pub struct ActivityRecorder {
    sink: Arc<dyn ActivitySink>,
}

impl ActivityRecorder {
    pub fn new(sink: Arc<dyn ActivitySink>) -> Self {
        Self { sink }
    }

    pub fn postgres(pool: DbPool) -> Self {
        Self::new(Arc::new(PgActivitySink::new(pool)))
    }

    /// Record one activity for a project mutation.
    ///
    /// Renders the description and metadata up front, then appends on a
    /// detached task. Returns immediately; the caller never observes the
    /// outcome of the append.
    pub fn record(&self, project_id: DbId, user_id: DbId, actor_name: &str, kind: ActivityKind) {
        let input = NewActivity {
            project_id,
            user_id,
            activity_type: kind.tag(),
            description: kind.describe(actor_name),
            metadata: kind.metadata(),
        };

        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            let activity_type = input.activity_type;
            if let Err(error) = sink.append(input).await {
                tracing::warn!(
                    %error,
                    project_id,
                    activity_type,
                    "failed to record activity"
                );
            }
        });
    }
}
