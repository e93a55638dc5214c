use crate::audit::{log_activity, notify_employee};
use crate::auth::auth::AuthUser;
use crate::leave::conflict::{find_conflicts, DeptLeave};
use crate::leave::workflow::{self, Decision, LeaveStatus, Stage, WorkflowError};
use crate::leave::calendar::business_day_count;
use crate::model::leave_request::LeaveRequest;
use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, MySqlPool, Row};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "Acara keluarga")]
    pub reason: String,
}

#[derive(Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveDetail {
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
    #[schema(example = "Cuti Tahunan")]
    pub leave_type: String,
    pub is_quota_deduction: bool,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(example = "manager")]
    pub current_stage: String,
    pub approved_by_manager: bool,
    pub approved_by_dfd: bool,
    pub approved_by_hrd: bool,
    #[schema(example = "2024-01-02T08:30:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by request status (pending/approved/rejected)
    #[schema(example = "pending")]
    pub status: Option<String>,
    /// Filter by pending stage (manager/dfd/hrd)
    #[schema(example = "hrd")]
    pub stage: Option<String>,
    /// Filter by requester department
    #[schema(example = "IT")]
    pub department: Option<String>,
    /// Filter by requester
    #[schema(example = 42)]
    pub employee_id: Option<u64>,
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u64>,
    /// Pagination per page number
    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveDetail>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

const DETAIL_COLUMNS: &str = r#"
    lr.id, lr.employee_id, e.full_name, e.department,
    lr.start_date, lr.end_date, lr.reason,
    lt.name AS leave_type, lt.is_quota_deduction,
    lr.status, lr.current_stage,
    lr.approved_by_manager, lr.approved_by_dfd, lr.approved_by_hrd,
    lr.created_at
"#;

const DETAIL_FROM: &str = r#"
    FROM leave_requests lr
    JOIN employees e ON e.id = lr.employee_id
    JOIN leave_types lt ON lt.id = lr.leave_type_id
"#;

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = Object, example = json!({
            "message": "Leave request submitted",
            "status": "pending",
            "current_stage": "manager"
         })),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    if payload.start_date > payload.end_date {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "start_date cannot be after end_date"
        })));
    }

    if payload.reason.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "reason is required"
        })));
    }

    let leave_type = sqlx::query("SELECT id FROM leave_types WHERE id = ?")
        .bind(payload.leave_type_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to look up leave type");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if leave_type.is_none() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Unknown leave type"
        })));
    }

    // The requester's own role decides which stage the request enters at
    let initial = workflow::initial_stage(auth.role);

    sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, start_date, end_date, reason, leave_type_id, status, current_stage)
        VALUES (?, ?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(employee_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.reason.trim())
    .bind(payload.leave_type_id)
    .bind(initial.as_ref())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to create leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request submitted",
        "status": "pending",
        "current_stage": initial.as_ref()
    })))
}

/* =========================
List leave requests (HRD)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND lr.status = ?");
        args.push(FilterValue::Str(status));
    }

    if let Some(stage) = query.stage.as_deref() {
        where_sql.push_str(" AND lr.current_stage = ?");
        args.push(FilterValue::Str(stage));
    }

    if let Some(department) = query.department.as_deref() {
        where_sql.push_str(" AND e.department = ?");
        args.push(FilterValue::Str(department));
    }

    if let Some(emp_id) = query.employee_id {
        where_sql.push_str(" AND lr.employee_id = ?");
        args.push(FilterValue::U64(emp_id));
    }

    let count_sql = format!("SELECT COUNT(*) {} {}", DETAIL_FROM, where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count leave requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        "SELECT {} {} {} ORDER BY lr.created_at DESC LIMIT ? OFFSET ?",
        DETAIL_COLUMNS, DETAIL_FROM, where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeaveDetail>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let leaves = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch leave list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data: leaves,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

/* =========================
Pending tasks for the caller's stage
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave/tasks",
    responses(
        (status = 200, description = "Pending requests waiting on the caller's role", body = [LeaveDetail]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approval_tasks(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_approver()?;

    let sql = format!(
        "SELECT {} {} WHERE lr.status = 'pending' AND lr.current_stage = ? ORDER BY lr.created_at ASC",
        DETAIL_COLUMNS, DETAIL_FROM
    );

    let tasks = sqlx::query_as::<_, LeaveDetail>(&sql)
        .bind(auth.role.as_ref())
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, role = %auth.role, "Failed to fetch approval tasks");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(tasks))
}

/* =========================
Caller's own request history
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave/mine",
    responses(
        (status = 200, description = "Caller's own requests, newest first", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let leaves = sqlx::query_as::<_, LeaveRequest>(
        r#"
        SELECT id, employee_id, start_date, end_date, reason, leave_type_id,
               status, current_stage,
               approved_by_manager, approved_by_dfd, approved_by_hrd, created_at
        FROM leave_requests
        WHERE employee_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch own leave history");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Leave request details
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_approver()?;

    let leave_id = path.into_inner();

    let sql = format!("SELECT {} {} WHERE lr.id = ?", DETAIL_COLUMNS, DETAIL_FROM);

    let leave = sqlx::query_as::<_, LeaveDetail>(&sql)
        .bind(leave_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match leave {
        Some(data) => Ok(HttpResponse::Ok().json(data)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
    }
}

#[derive(Serialize, ToSchema)]
pub struct ConflictEntry {
    #[schema(example = 2)]
    pub request_id: u64,
    #[schema(example = 51)]
    pub employee_id: u64,
    #[schema(example = "Siti Rahma")]
    pub full_name: String,
    #[schema(example = "2024-01-11", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

/* =========================
Schedule conflicts (advisory)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}/conflicts",
    params(
        ("leave_id" = u64, Path, description = "Candidate leave request")
    ),
    responses(
        (status = 200, description = "Approved same-department requests overlapping the candidate", body = [ConflictEntry]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn leave_conflicts(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_approver()?;

    let leave_id = path.into_inner();

    let candidate = fetch_dept_leave(pool.get_ref(), leave_id).await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to fetch candidate request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(candidate) = candidate else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        })));
    };

    let approved = sqlx::query(
        r#"
        SELECT lr.id, lr.employee_id, e.full_name, e.department, lr.start_date, lr.end_date
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        WHERE lr.status = 'approved' AND e.department = ?
        "#,
    )
    .bind(&candidate.department)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch approved requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?
    .into_iter()
    .map(|row| DeptLeave {
        request_id: row.get("id"),
        employee_id: row.get("employee_id"),
        employee_name: row.get("full_name"),
        department: row.get("department"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    })
    .collect::<Vec<_>>();

    let conflicts: Vec<ConflictEntry> = find_conflicts(&candidate, &approved)
        .into_iter()
        .map(|c| ConflictEntry {
            request_id: c.request_id,
            employee_id: c.employee_id,
            full_name: c.employee_name.clone(),
            start_date: c.start_date,
            end_date: c.end_date,
        })
        .collect();

    Ok(HttpResponse::Ok().json(conflicts))
}

async fn fetch_dept_leave(pool: &MySqlPool, leave_id: u64) -> Result<Option<DeptLeave>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT lr.id, lr.employee_id, e.full_name, e.department, lr.start_date, lr.end_date
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        WHERE lr.id = ?
        "#,
    )
    .bind(leave_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| DeptLeave {
        request_id: row.get("id"),
        employee_id: row.get("employee_id"),
        employee_name: row.get("full_name"),
        department: row.get("department"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    }))
}

/* =========================
Approve / reject
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Decision applied", body = Object, example = json!({
            "message": "Leave approved", "current_stage": "hrd"
        })),
        (status = 400, description = "Request already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller's role does not own the current stage"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Stage changed concurrently; refetch and retry")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    process_decision(auth, pool, path.into_inner(), Decision::Approve).await
}

#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Decision applied", body = Object, example = json!({
            "message": "Leave rejected", "current_stage": "completed"
        })),
        (status = 400, description = "Request already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller's role does not own the current stage"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Stage changed concurrently; refetch and retry")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    process_decision(auth, pool, path.into_inner(), Decision::Reject).await
}

#[derive(FromRow)]
struct LeaveForDecision {
    employee_id: u64,
    full_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
    current_stage: String,
    is_quota_deduction: bool,
}

async fn process_decision(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    leave_id: u64,
    decision: Decision,
) -> actix_web::Result<HttpResponse> {
    auth.require_approver()?;

    let row = sqlx::query_as::<_, LeaveForDecision>(
        r#"
        SELECT lr.employee_id, e.full_name, lr.start_date, lr.end_date,
               lr.status, lr.current_stage, lt.is_quota_deduction
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        JOIN leave_types lt ON lt.id = lr.leave_type_id
        WHERE lr.id = ?
        "#,
    )
    .bind(leave_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(row) = row else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        })));
    };

    let status = LeaveStatus::from_str(&row.status).map_err(|_| {
        tracing::error!(leave_id, status = %row.status, "Corrupt status value");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;
    let stage = Stage::from_str(&row.current_stage).map_err(|_| {
        tracing::error!(leave_id, stage = %row.current_stage, "Corrupt stage value");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let transition = match workflow::apply(stage, status, auth.role, decision) {
        Ok(t) => t,
        Err(WorkflowError::Terminal(_)) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Leave request not found or already processed"
            })));
        }
        Err(e @ WorkflowError::WrongStage { .. }) | Err(e @ WorkflowError::NotApprover(_)) => {
            return Ok(HttpResponse::Forbidden().json(serde_json::json!({
                "message": e.to_string()
            })));
        }
    };

    let flag_column = transition.approved_flag.map(|s| match s {
        Stage::Manager => "approved_by_manager",
        Stage::Dfd => "approved_by_dfd",
        Stage::Hrd => "approved_by_hrd",
        Stage::Completed => "approved_by_hrd", // never produced by the machine
    });

    // Deduction only happens on final hrd approval, scaled to zero when
    // the leave type does not touch the quota.
    let deduction = if transition.deducts_balance && row.is_quota_deduction {
        let holidays = crate::api::holiday::holiday_set(pool.get_ref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load holidays");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
        business_day_count(row.start_date, row.end_date, &holidays) as i32
    } else {
        0
    };

    // Guarded update: the WHERE clause re-checks stage and status so a
    // concurrent decision loses cleanly instead of re-applying.
    let set_flag = flag_column
        .map(|c| format!(", {} = TRUE", c))
        .unwrap_or_default();
    let update_sql = format!(
        "UPDATE leave_requests SET status = ?, current_stage = ?{} \
         WHERE id = ? AND status = 'pending' AND current_stage = ?",
        set_flag
    );

    let mut tx = pool.get_ref().begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let updated = sqlx::query(&update_sql)
        .bind(transition.next_status.as_ref())
        .bind(transition.next_stage.as_ref())
        .bind(leave_id)
        .bind(stage.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Decision update failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if updated.rows_affected() == 0 {
        // Someone else advanced or terminated the request first.
        let _ = tx.rollback().await;
        return Ok(HttpResponse::Conflict().json(serde_json::json!({
            "message": "Request changed while deciding; refetch and retry"
        })));
    }

    if deduction > 0 {
        sqlx::query("UPDATE employees SET leave_balance = leave_balance - ? WHERE id = ?")
            .bind(deduction)
            .bind(row.employee_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, leave_id, "Balance deduction failed");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to commit decision");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // Audit + notification are secondary effects: best-effort, never
    // rolling back the committed transition.
    match decision {
        Decision::Approve => {
            log_activity(
                pool.get_ref(),
                &auth.email,
                "APPROVE",
                &format!("{} menyetujui cuti {}", auth.role, row.full_name),
            )
            .await;
            let message = if transition.next_status == LeaveStatus::Approved {
                format!("Pengajuan disetujui. Saldo terpotong: {} hari.", deduction)
            } else {
                format!("Pengajuan diteruskan ke tahap {}.", transition.next_stage)
            };
            notify_employee(pool.get_ref(), row.employee_id, "Pengajuan Disetujui", &message).await;
        }
        Decision::Reject => {
            log_activity(
                pool.get_ref(),
                &auth.email,
                "REJECT",
                &format!("{} menolak cuti {}", auth.role, row.full_name),
            )
            .await;
            notify_employee(
                pool.get_ref(),
                row.employee_id,
                "Pengajuan Ditolak",
                "Maaf, pengajuan cuti Anda ditolak.",
            )
            .await;
        }
    }

    let message = match decision {
        Decision::Approve => "Leave approved",
        Decision::Reject => "Leave rejected",
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "status": transition.next_status.as_ref(),
        "current_stage": transition.next_stage.as_ref(),
        "deducted_days": deduction
    })))
}
