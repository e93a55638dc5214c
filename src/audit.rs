use sqlx::MySqlPool;

/// Append one audit row. Best-effort by contract: a failure here is
/// logged and swallowed so it can never roll back or fail the state
/// transition that triggered it.
pub async fn log_activity(pool: &MySqlPool, actor_email: &str, action_type: &str, description: &str) {
    let result = sqlx::query(
        "INSERT INTO activity_logs (actor_email, action_type, description) VALUES (?, ?, ?)",
    )
    .bind(actor_email)
    .bind(action_type)
    .bind(description)
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::error!(error = %e, action_type, "Failed to write activity log");
    }
}

/// Queue a notification for an employee. Same best-effort contract as
/// the audit trail.
pub async fn notify_employee(pool: &MySqlPool, employee_id: u64, title: &str, message: &str) {
    let result = sqlx::query(
        "INSERT INTO notifications (employee_id, title, message) VALUES (?, ?, ?)",
    )
    .bind(employee_id)
    .bind(title)
    .bind(message)
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::error!(error = %e, employee_id, "Failed to queue notification");
    }
}
