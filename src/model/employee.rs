use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "full_name": "Budi Santoso",
        "email": "budi.santoso@company.com",
        "phone": "+628112345678",
        "department": "IT",
        "role": "employee",
        "manager_id": 7,
        "join_date": "2019-04-01",
        "leave_balance": 12,
        "basic_salary": 8400000.0,
        "status": "active"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Budi Santoso")]
    pub full_name: String,

    #[schema(example = "budi.santoso@company.com")]
    pub email: String,

    #[schema(example = "+628112345678", nullable = true)]
    pub phone: Option<String>,

    /// Must match a row of the departments master table.
    #[schema(example = "IT")]
    pub department: String,

    #[schema(example = "employee")]
    pub role: String,

    /// Weak parent pointer; the hierarchy is assumed well-formed.
    #[schema(example = 7, nullable = true)]
    pub manager_id: Option<u64>,

    #[schema(example = "2019-04-01", value_type = String, format = "date", nullable = true)]
    pub join_date: Option<NaiveDate>,

    /// Signed: a negative balance is leave debt.
    #[schema(example = 12)]
    pub leave_balance: i32,

    #[schema(example = 8400000.0)]
    pub basic_salary: f64,

    #[schema(example = "active")]
    pub status: String,
}
