use crate::auth::auth::AuthUser;
use crate::model::notification::Notification;
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct NotificationFeed {
    /// Latest notifications, newest first
    pub data: Vec<Notification>,
    #[schema(example = 2)]
    pub unread: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Latest 10 notifications plus unread count", body = NotificationFeed),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notification"
)]
pub async fn list_notifications(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let data = sqlx::query_as::<_, Notification>(
        "SELECT id, employee_id, title, message, is_read, created_at \
         FROM notifications WHERE employee_id = ? ORDER BY created_at DESC LIMIT 10",
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch notifications");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let unread = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE employee_id = ? AND is_read = FALSE",
    )
    .bind(employee_id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to count unread notifications");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(NotificationFeed { data, unread }))
}

#[utoipa::path(
    put,
    path = "/api/v1/notifications/{notification_id}/read",
    params(
        ("notification_id" = u64, Path, description = "Notification to mark as read")
    ),
    responses(
        (status = 200, description = "Marked as read"),
        (status = 404, description = "Notification not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Notification"
)]
pub async fn mark_read(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let notification_id = path.into_inner();

    // Scoped to the caller so nobody can touch someone else's feed
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE id = ? AND employee_id = ?",
    )
    .bind(notification_id)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, notification_id, "Failed to mark notification read");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Notification not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Marked as read"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "All of the caller's notifications cleared"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Notification"
)]
pub async fn clear_notifications(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    sqlx::query("DELETE FROM notifications WHERE employee_id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to clear notifications");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Notifications cleared"
    })))
}
