use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Static reference data for leave categories.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveType {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Cuti Tahunan")]
    pub name: String,

    #[schema(example = "ANNUAL")]
    pub code: String,

    /// Whether final approval deducts the business-day count from the
    /// requester's balance.
    pub is_quota_deduction: bool,

    /// Whether a supporting document must accompany the request.
    pub requires_file: bool,

    #[schema(example = "blue")]
    pub badge_color: String,
}
