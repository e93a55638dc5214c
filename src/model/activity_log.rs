use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Best-effort audit trail row.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ActivityLog {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "hrd@company.com")]
    pub actor_email: String,

    #[schema(example = "APPROVE")]
    pub action_type: String,

    #[schema(example = "hrd menyetujui cuti Budi Santoso")]
    pub description: String,

    #[schema(example = "2024-01-15T09:00:00Z", value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}
