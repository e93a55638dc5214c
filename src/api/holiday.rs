use crate::auth::auth::AuthUser;
use crate::model::holiday::PublicHoliday;
use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Tahun Baru")]
    pub description: String,
}

/// Holiday dates as the exclusion set the calendar rules consume.
pub async fn holiday_set(pool: &MySqlPool) -> Result<HashSet<NaiveDate>, sqlx::Error> {
    let dates = sqlx::query_scalar::<_, NaiveDate>("SELECT date FROM public_holidays")
        .fetch_all(pool)
        .await?;

    Ok(dates.into_iter().collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/holidays",
    responses(
        (status = 200, description = "All public holidays, oldest first", body = [PublicHoliday])
    ),
    security(("bearer_auth" = [])),
    tag = "Holiday"
)]
pub async fn list_holidays(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let holidays = sqlx::query_as::<_, PublicHoliday>(
        "SELECT id, date, description FROM public_holidays ORDER BY date ASC",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch holidays");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(holidays))
}

#[utoipa::path(
    post,
    path = "/api/v1/holidays",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Date already registered"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Holiday"
)]
pub async fn create_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateHoliday>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    if payload.description.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "description is required"
        })));
    }

    let result = sqlx::query("INSERT INTO public_holidays (date, description) VALUES (?, ?)")
        .bind(payload.date)
        .bind(payload.description.trim())
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Holiday created"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "A holiday already exists on that date"
                    })));
                }
            }

            tracing::error!(error = %e, "Failed to create holiday");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/holidays/{holiday_id}",
    params(
        ("holiday_id" = u64, Path, description = "Holiday ID")
    ),
    responses(
        (status = 200, description = "Holiday deleted"),
        (status = 404, description = "Holiday not found"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Holiday"
)]
pub async fn delete_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hrd()?;

    let holiday_id = path.into_inner();

    let result = sqlx::query("DELETE FROM public_holidays WHERE id = ?")
        .bind(holiday_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, holiday_id, "Failed to delete holiday");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Holiday not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Holiday deleted"
    })))
}
