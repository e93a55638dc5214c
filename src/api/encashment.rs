use crate::audit::{log_activity, notify_employee};
use crate::auth::auth::AuthUser;
use crate::leave::calendar::tenure_quota;
use crate::leave::encashment::encashment_amount;
use actix_web::{web, HttpResponse, Responder};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{prelude::FromRow, MySqlPool};
use utoipa::ToSchema;

#[derive(Serialize, FromRow, ToSchema)]
pub struct EligibleEmployee {
    #[schema(example = 42)]
    pub id: u64,
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = "2019-04-01", format = "date", value_type = String, nullable = true)]
    pub join_date: Option<NaiveDate>,
    #[schema(example = 10)]
    pub leave_balance: i32,
    #[schema(example = 8400000.0)]
    pub basic_salary: f64,
}

#[derive(Serialize, ToSchema)]
pub struct EligibleEntry {
    #[schema(example = 42)]
    pub id: u64,
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = "2019-04-01", format = "date", value_type = String, nullable = true)]
    pub join_date: Option<NaiveDate>,
    #[schema(example = 10)]
    pub leave_balance: i32,
    #[schema(example = 8400000.0)]
    pub basic_salary: f64,
    /// Payout if the balance is cashed out now
    #[schema(example = 4000000)]
    pub encashment_amount: i64,
    /// Annual quota the employee's tenure grants
    #[schema(example = 12)]
    pub tenure_quota: i32,
    /// Salary missing or zero: payout is 0, warn the operator
    pub zero_salary: bool,
}

#[derive(Serialize, FromRow, ToSchema)]
pub struct EncashmentHistoryEntry {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 42)]
    pub employee_id: u64,
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = "2024-04-01", format = "date", value_type = String)]
    pub period: NaiveDate,
    #[schema(example = 4000000)]
    pub encashment_amount: i64,
    #[schema(example = "2024-04-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<chrono::DateTime<Utc>>,
}

#[derive(Deserialize, ToSchema)]
pub struct AnnualResetReq {
    /// The reset wipes every active employee's remaining balance; the
    /// caller must say so explicitly.
    pub confirm: bool,
}

fn current_period() -> Option<NaiveDate> {
    let today = Utc::now().date_naive();
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
}

/* =========================
Eligible employees
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/encashment/eligible",
    responses(
        (status = 200, description = "Active employees with a positive balance", body = [EligibleEntry]),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Encashment"
)]
pub async fn eligible_employees(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let employees = sqlx::query_as::<_, EligibleEmployee>(
        r#"
        SELECT id, full_name, department, join_date, leave_balance, basic_salary
        FROM employees
        WHERE status = 'active' AND leave_balance > 0
        ORDER BY full_name ASC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch eligible employees");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let today = Utc::now().date_naive();
    let entries: Vec<EligibleEntry> = employees
        .into_iter()
        .map(|emp| EligibleEntry {
            encashment_amount: encashment_amount(emp.basic_salary, emp.leave_balance),
            tenure_quota: tenure_quota(emp.join_date, today),
            zero_salary: emp.basic_salary <= 0.0,
            id: emp.id,
            full_name: emp.full_name,
            department: emp.department,
            join_date: emp.join_date,
            leave_balance: emp.leave_balance,
            basic_salary: emp.basic_salary,
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

/* =========================
Cash out one employee
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/encashment/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee whose balance is cashed out")
    ),
    responses(
        (status = 200, description = "Balance cashed out", body = Object, example = json!({
            "message": "Encashment recorded",
            "encashment_amount": 4000000,
            "days_cashed": 10
        })),
        (status = 400, description = "Nothing to cash out"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Already cashed out this period")
    ),
    security(("bearer_auth" = [])),
    tag = "Encashment"
)]
pub async fn cash_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, EligibleEmployee>(
        "SELECT id, full_name, department, join_date, leave_balance, basic_salary \
         FROM employees WHERE id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(employee) = employee else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    };

    if employee.leave_balance <= 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "No remaining balance to cash out"
        })));
    }

    let amount = encashment_amount(employee.basic_salary, employee.leave_balance);
    let period = current_period().ok_or_else(|| {
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // Ledger append and balance reset are one unit: a retry after a
    // partial failure must not double-pay, so both ride one transaction.
    let mut tx = pool.get_ref().begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO payrolls (employee_id, period, basic_salary, encashment_amount, net_salary, status)
        VALUES (?, ?, ?, ?, ?, 'paid')
        "#,
    )
    .bind(employee_id)
    .bind(period)
    .bind(employee.basic_salary)
    .bind(amount)
    .bind(amount)
    .execute(&mut *tx)
    .await;

    if let Err(e) = inserted {
        let _ = tx.rollback().await;

        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23000") {
                return Ok(HttpResponse::Conflict().json(json!({
                    "message": "Encashment already recorded for this period"
                })));
            }
        }

        tracing::error!(error = %e, employee_id, "Failed to append payroll entry");
        return Err(actix_web::error::ErrorInternalServerError("Internal Server Error"));
    }

    sqlx::query("UPDATE employees SET leave_balance = 0 WHERE id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to zero balance");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to commit encashment");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    log_activity(
        pool.get_ref(),
        &auth.email,
        "ENCASH",
        &format!(
            "hrd mencairkan {} hari cuti {} senilai {}",
            employee.leave_balance, employee.full_name, amount
        ),
    )
    .await;
    notify_employee(
        pool.get_ref(),
        employee_id,
        "Cuti Dicairkan",
        &format!(
            "{} hari cuti dicairkan senilai {}. Saldo Anda kini 0.",
            employee.leave_balance, amount
        ),
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Encashment recorded",
        "encashment_amount": amount,
        "days_cashed": employee.leave_balance,
        "zero_salary": employee.basic_salary <= 0.0
    })))
}

/* =========================
Encashment history
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/encashment/history",
    responses(
        (status = 200, description = "Past encashments, newest first", body = [EncashmentHistoryEntry]),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Encashment"
)]
pub async fn encashment_history(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let history = sqlx::query_as::<_, EncashmentHistoryEntry>(
        r#"
        SELECT p.id, p.employee_id, e.full_name, e.department, p.period, p.encashment_amount, p.created_at
        FROM payrolls p
        JOIN employees e ON e.id = p.employee_id
        WHERE p.encashment_amount > 0
        ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch encashment history");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(history))
}

/* =========================
Annual quota reset
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/encashment/reset",
    request_body = AnnualResetReq,
    responses(
        (status = 200, description = "Balances rewritten from tenure", body = Object, example = json!({
            "message": "Annual reset complete",
            "employees_reset": 57
        })),
        (status = 400, description = "Missing confirmation"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Encashment"
)]
pub async fn annual_reset(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<AnnualResetReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    // Destructive and irreversible: prior unused balances are discarded.
    if !payload.confirm {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Annual reset requires explicit confirmation"
        })));
    }

    let employees = sqlx::query_as::<_, (u64, Option<NaiveDate>)>(
        "SELECT id, join_date FROM employees WHERE status = 'active'",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch active employees");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let today = Utc::now().date_naive();

    let mut tx = pool.get_ref().begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let mut reset_count = 0u64;
    for (id, join_date) in &employees {
        let quota = tenure_quota(*join_date, today);

        sqlx::query("UPDATE employees SET leave_balance = ? WHERE id = ?")
            .bind(quota)
            .bind(*id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, employee_id = id, "Failed to reset balance");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

        reset_count += 1;
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to commit annual reset");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    log_activity(
        pool.get_ref(),
        &auth.email,
        "RESET",
        &format!("hrd mereset saldo cuti {} karyawan sesuai masa kerja", reset_count),
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Annual reset complete",
        "employees_reset": reset_count
    })))
}
