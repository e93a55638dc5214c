use crate::api::activity_log::{LogListResponse, LogQuery};
use crate::api::calendar::{CalendarEntry, CalendarQuery};
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::api::encashment::{
    AnnualResetReq, EligibleEmployee, EligibleEntry, EncashmentHistoryEntry,
};
use crate::api::holiday::CreateHoliday;
use crate::api::leave_request::{
    ConflictEntry, CreateLeave, LeaveDetail, LeaveFilter, LeaveListResponse,
};
use crate::api::master_data::{CreateDepartment, CreateLeaveType};
use crate::api::notification::NotificationFeed;
use crate::api::report::{MonthlyReport, MonthlyReportQuery, OverviewStats, ReportRow};
use crate::model::activity_log::ActivityLog;
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::holiday::PublicHoliday;
use crate::model::leave_request::LeaveRequest;
use crate::model::leave_type::LeaveType;
use crate::model::notification::Notification;
use crate::models::{LoginReqDto, RegisterReq};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management System

This API powers a leave-management system: submission, a multi-stage
approval chain, and the HR administration around it.

### Key Features
- **Leave Requests**
  - Submit requests, track stage progression (manager/dfd -> hrd),
    approve or reject at each stage
- **Leave Accounting**
  - Working-day durations (weekends and public holidays excluded),
    tenure-based annual quotas, balance deduction on final approval
- **Encashment**
  - Convert remaining balances to payouts, annual quota reset
- **Master Data**
  - Departments, leave types, public holidays
- **Reporting**
  - Monthly recaps and an executive overview

### Security
Most endpoints are protected with **JWT Bearer authentication**.
Sensitive operations require the **hrd** role.

### Response Format
- JSON-based RESTful responses
- Pagination supported on list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::approval_tasks,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::leave_conflicts,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::calendar::month_calendar,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::master_data::list_departments,
        crate::api::master_data::create_department,
        crate::api::master_data::delete_department,
        crate::api::master_data::list_leave_types,
        crate::api::master_data::create_leave_type,
        crate::api::master_data::delete_leave_type,

        crate::api::holiday::list_holidays,
        crate::api::holiday::create_holiday,
        crate::api::holiday::delete_holiday,

        crate::api::encashment::eligible_employees,
        crate::api::encashment::cash_out,
        crate::api::encashment::encashment_history,
        crate::api::encashment::annual_reset,

        crate::api::report::monthly_report,
        crate::api::report::overview,

        crate::api::notification::list_notifications,
        crate::api::notification::mark_read,
        crate::api::notification::clear_notifications,

        crate::api::activity_log::list_logs
    ),
    components(
        schemas(
            CreateLeave,
            LeaveDetail,
            LeaveRequest,
            LeaveFilter,
            LeaveListResponse,
            ConflictEntry,
            CalendarEntry,
            CalendarQuery,
            CreateEmployee,
            Employee,
            EmployeeListResponse,
            Department,
            CreateDepartment,
            LeaveType,
            CreateLeaveType,
            PublicHoliday,
            CreateHoliday,
            EligibleEmployee,
            EligibleEntry,
            EncashmentHistoryEntry,
            AnnualResetReq,
            MonthlyReport,
            MonthlyReportQuery,
            ReportRow,
            OverviewStats,
            Notification,
            NotificationFeed,
            ActivityLog,
            LogListResponse,
            LogQuery,
            RegisterReq,
            LoginReqDto
        )
    ),
    tags(
        (name = "Leave", description = "Leave request lifecycle APIs"),
        (name = "Calendar", description = "Shared leave calendar"),
        (name = "Employee", description = "Employee profile APIs"),
        (name = "MasterData", description = "Departments and leave types"),
        (name = "Holiday", description = "Public holiday APIs"),
        (name = "Encashment", description = "Balance payout and annual reset"),
        (name = "Report", description = "Recaps and statistics"),
        (name = "Notification", description = "In-app notification feed"),
        (name = "Audit", description = "Activity log"),
    )
)]
pub struct ApiDoc;
