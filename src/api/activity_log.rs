use crate::auth::auth::AuthUser;
use crate::model::activity_log::ActivityLog;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LogQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,
    #[schema(example = 50)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct LogListResponse {
    pub data: Vec<ActivityLog>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 50)]
    pub per_page: u32,
    #[schema(example = 240)]
    pub total: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Audit trail, newest first", body = LogListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Audit"
)]
pub async fn list_logs(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LogQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).clamp(1, 200);
    let offset = (page - 1) * per_page;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_logs")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to count activity logs");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let data = sqlx::query_as::<_, ActivityLog>(
        "SELECT id, actor_email, action_type, description, created_at \
         FROM activity_logs ORDER BY created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(per_page as i64)
    .bind(offset as i64)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch activity logs");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(LogListResponse {
        data,
        page,
        per_page,
        total,
    }))
}
