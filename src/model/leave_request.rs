use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub employee_id: u64,

    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2024-01-12", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Acara keluarga")]
    pub reason: String,

    #[schema(example = 1)]
    pub leave_type_id: u64,

    /// pending | approved | rejected (terminal once non-pending)
    #[schema(example = "pending")]
    pub status: String,

    /// manager | dfd | hrd | completed
    #[schema(example = "manager")]
    pub current_stage: String,

    pub approved_by_manager: bool,
    pub approved_by_dfd: bool,
    pub approved_by_hrd: bool,

    #[schema(example = "2024-01-02T08:30:00Z", value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}
