use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Notification {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub employee_id: u64,

    #[schema(example = "Pengajuan Disetujui")]
    pub title: String,

    #[schema(example = "Pengajuan disetujui. Saldo terpotong: 3 hari.")]
    pub message: String,

    pub is_read: bool,

    #[schema(example = "2024-01-15T09:00:00Z", value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}
