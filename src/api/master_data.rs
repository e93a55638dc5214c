use crate::auth::auth::AuthUser;
use crate::model::{department::Department, leave_type::LeaveType};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateDepartment {
    #[schema(example = "Information Technology")]
    pub name: String,
    #[schema(example = "IT")]
    pub code: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveType {
    #[schema(example = "Cuti Tahunan")]
    pub name: String,
    #[schema(example = "ANNUAL")]
    pub code: String,
    #[serde(default = "default_true")]
    pub is_quota_deduction: bool,
    #[serde(default)]
    pub requires_file: bool,
    #[serde(default = "default_badge_color")]
    #[schema(example = "blue")]
    pub badge_color: String,
}

fn default_true() -> bool {
    true
}

fn default_badge_color() -> String {
    "blue".to_string()
}

/* =========================
Departments
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "Department master list", body = [Department])
    ),
    security(("bearer_auth" = [])),
    tag = "MasterData"
)]
pub async fn list_departments(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let departments =
        sqlx::query_as::<_, Department>("SELECT id, name, code FROM departments ORDER BY name ASC")
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch departments");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

    Ok(HttpResponse::Ok().json(departments))
}

#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate name or code"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "MasterData"
)]
pub async fn create_department(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateDepartment>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "name and code are required"
        })));
    }

    let result = sqlx::query("INSERT INTO departments (name, code) VALUES (?, ?)")
        .bind(payload.name.trim())
        .bind(payload.code.trim().to_uppercase())
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Department created"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "Department name or code already exists"
                    })));
                }
            }

            tracing::error!(error = %e, "Failed to create department");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/departments/{department_id}",
    params(
        ("department_id" = u64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 404, description = "Department not found"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "MasterData"
)]
pub async fn delete_department(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let department_id = path.into_inner();

    let result = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(department_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, department_id, "Failed to delete department");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Department not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Department deleted"
    })))
}

/* =========================
Leave types
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave-types",
    responses(
        (status = 200, description = "Leave type master list", body = [LeaveType])
    ),
    security(("bearer_auth" = [])),
    tag = "MasterData"
)]
pub async fn list_leave_types(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let types = sqlx::query_as::<_, LeaveType>(
        "SELECT id, name, code, is_quota_deduction, requires_file, badge_color \
         FROM leave_types ORDER BY created_at ASC",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch leave types");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(types))
}

#[utoipa::path(
    post,
    path = "/api/v1/leave-types",
    request_body = CreateLeaveType,
    responses(
        (status = 201, description = "Leave type created"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate code"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "MasterData"
)]
pub async fn create_leave_type(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeaveType>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "name and code are required"
        })));
    }

    let result = sqlx::query(
        "INSERT INTO leave_types (name, code, is_quota_deduction, requires_file, badge_color) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(payload.name.trim())
    .bind(payload.code.trim().to_uppercase())
    .bind(payload.is_quota_deduction)
    .bind(payload.requires_file)
    .bind(&payload.badge_color)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Leave type created"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "Leave type code already exists"
                    })));
                }
            }

            tracing::error!(error = %e, "Failed to create leave type");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/leave-types/{leave_type_id}",
    params(
        ("leave_type_id" = u64, Path, description = "Leave type ID")
    ),
    responses(
        (status = 200, description = "Leave type deleted"),
        (status = 404, description = "Leave type not found"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "MasterData"
)]
pub async fn delete_leave_type(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let leave_type_id = path.into_inner();

    let result = sqlx::query("DELETE FROM leave_types WHERE id = ?")
        .bind(leave_type_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_type_id, "Failed to delete leave type");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Leave type not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave type deleted"
    })))
}
