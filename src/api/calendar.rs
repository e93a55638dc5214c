use crate::auth::auth::AuthUser;
use crate::leave::visibility::{visible_to, Requester, Viewer};
use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, MySqlPool};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 1)]
    pub month: u32,
}

#[derive(FromRow)]
struct CalendarRow {
    id: u64,
    employee_id: u64,
    full_name: String,
    role: String,
    department: String,
    manager_id: Option<u64>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarEntry {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 42)]
    pub employee_id: u64,
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    #[schema(example = "employee")]
    pub role: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Acara keluarga")]
    pub reason: String,
    /// The viewer's own entry (rendered differently by clients)
    pub own: bool,
}

/// Viewer profile fields the scope filter needs.
#[derive(FromRow)]
struct ViewerRow {
    department: String,
}

/* =========================
Shared monthly calendar
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Approved leave overlapping the month, scoped to the caller", body = [CalendarEntry]),
        (status = 400, description = "Malformed month"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn month_calendar(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<CalendarQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let Some(start) = NaiveDate::from_ymd_opt(query.year, query.month, 1) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "year/month out of range"
        })));
    };
    let end = match if query.month == 12 {
        NaiveDate::from_ymd_opt(query.year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(query.year, query.month + 1, 1)
    }
    .and_then(|next| next.pred_opt())
    {
        Some(d) => d,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "year/month out of range"
            })));
        }
    };

    let viewer_row = sqlx::query_as::<_, ViewerRow>("SELECT department FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch viewer profile");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(viewer_row) = viewer_row else {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "message": "No employee profile"
        })));
    };

    let viewer = Viewer {
        employee_id,
        role: auth.role,
        department: viewer_row.department,
    };

    // Approved requests intersecting the month; scope filtering happens
    // in process so the hierarchy rules live in one place.
    let rows = sqlx::query_as::<_, CalendarRow>(
        r#"
        SELECT lr.id, lr.employee_id, e.full_name, e.role, e.department, e.manager_id,
               lr.start_date, lr.end_date, lr.reason
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        WHERE lr.status = 'approved' AND lr.start_date <= ? AND lr.end_date >= ?
        ORDER BY lr.start_date ASC
        "#,
    )
    .bind(end)
    .bind(start)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch calendar entries");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let entries: Vec<CalendarEntry> = rows
        .into_iter()
        .filter(|row| {
            let requester = Requester {
                employee_id: row.employee_id,
                manager_id: row.manager_id,
                department: row.department.clone(),
            };
            visible_to(&viewer, &requester)
        })
        .map(|row| CalendarEntry {
            own: row.employee_id == viewer.employee_id,
            id: row.id,
            employee_id: row.employee_id,
            full_name: row.full_name,
            role: row.role,
            department: row.department,
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}
