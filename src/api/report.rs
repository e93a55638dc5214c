use crate::api::holiday::holiday_set;
use crate::auth::auth::AuthUser;
use crate::leave::calendar::business_day_count;
use actix_web::{web, HttpResponse, Responder};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, MySqlPool};
use std::collections::{BTreeMap, HashSet};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct MonthlyReportQuery {
    /// Reporting month as YYYY-MM
    #[schema(example = "2024-01")]
    pub month: String,
}

#[derive(Serialize, FromRow, ToSchema)]
pub struct ReportRow {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 42)]
    pub employee_id: u64,
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Acara keluarga")]
    pub reason: String,
    /// Working days in the range, weekends and holidays excluded.
    /// Not a table column; filled in after the fetch.
    #[sqlx(default)]
    #[schema(example = 3)]
    pub duration_days: u32,
}

#[derive(Serialize, ToSchema)]
pub struct MonthlyReport {
    pub rows: Vec<ReportRow>,
    /// Sum of working-day durations
    #[schema(example = 11)]
    pub total_days: u32,
    /// Distinct employees on leave in the month
    #[schema(example = 4)]
    pub total_people: usize,
}

#[derive(Serialize, ToSchema)]
pub struct OverviewStats {
    #[schema(example = 57)]
    pub total_employees: i64,
    #[schema(example = 2)]
    pub on_leave_today: i64,
    #[schema(example = 5)]
    pub pending_requests: i64,
    /// Employees whose balance has gone negative
    #[schema(example = 1)]
    pub leave_debt_employees: i64,
    /// Approved request counts per department
    pub by_department: BTreeMap<String, i64>,
    /// Approved request counts per month (1..=12) of the current year
    pub monthly_trend: Vec<i64>,
}

/* =========================
Monthly recap
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly",
    params(MonthlyReportQuery),
    responses(
        (status = 200, description = "Approved leave starting in the month", body = MonthlyReport),
        (status = 400, description = "Malformed month"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
pub async fn monthly_report(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<MonthlyReportQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let Some((start, end)) = month_window(&query.month) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "month must be formatted as YYYY-MM"
        })));
    };

    let mut rows = sqlx::query_as::<_, ReportRow>(
        r#"
        SELECT lr.id, lr.employee_id, e.full_name, e.department,
               lr.start_date, lr.end_date, lr.reason
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        WHERE lr.status = 'approved' AND lr.start_date BETWEEN ? AND ?
        ORDER BY lr.start_date ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch monthly report rows");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let holidays = holiday_set(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load holidays");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let mut total_days = 0u32;
    let mut people: HashSet<u64> = HashSet::new();
    for row in &mut rows {
        row.duration_days = business_day_count(row.start_date, row.end_date, &holidays);
        total_days += row.duration_days;
        people.insert(row.employee_id);
    }

    Ok(HttpResponse::Ok().json(MonthlyReport {
        total_people: people.len(),
        total_days,
        rows,
    }))
}

fn month_window(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = month.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;

    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let end = next.pred_opt()?;

    Some((start, end))
}

/* =========================
Executive overview
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/reports/overview",
    responses(
        (status = 200, description = "Operational statistics", body = OverviewStats),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
pub async fn overview(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let pool = pool.get_ref();
    let today = Utc::now().date_naive();

    let total_employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await
        .map_err(internal)?;

    let on_leave_today = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM leave_requests \
         WHERE status = 'approved' AND start_date <= ? AND end_date >= ?",
    )
    .bind(today)
    .bind(today)
    .fetch_one(pool)
    .await
    .map_err(internal)?;

    let pending_requests =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leave_requests WHERE status = 'pending'")
            .fetch_one(pool)
            .await
            .map_err(internal)?;

    let leave_debt_employees =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE leave_balance < 0")
            .fetch_one(pool)
            .await
            .map_err(internal)?;

    let dept_rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT e.department, COUNT(*) AS approved
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        WHERE lr.status = 'approved'
        GROUP BY e.department
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(internal)?;

    let trend_rows = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT CAST(MONTH(start_date) AS SIGNED) AS m, COUNT(*) AS approved
        FROM leave_requests
        WHERE status = 'approved' AND YEAR(start_date) = ?
        GROUP BY CAST(MONTH(start_date) AS SIGNED)
        "#,
    )
    .bind(today.year())
    .fetch_all(pool)
    .await
    .map_err(internal)?;

    let mut monthly_trend = vec![0i64; 12];
    for (month, count) in trend_rows {
        if (1..=12).contains(&month) {
            monthly_trend[month as usize - 1] = count;
        }
    }

    Ok(HttpResponse::Ok().json(OverviewStats {
        total_employees,
        on_leave_today,
        pending_requests,
        leave_debt_employees,
        by_department: dept_rows.into_iter().collect(),
        monthly_trend,
    }))
}

fn internal(e: sqlx::Error) -> actix_web::Error {
    tracing::error!(error = %e, "Overview query failed");
    actix_web::error::ErrorInternalServerError("Internal Server Error")
}
