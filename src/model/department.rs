use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Information Technology")]
    pub name: String,

    #[schema(example = "IT")]
    pub code: String,
}
