//! The leave accounting core: pure calendar/quota/payout arithmetic,
//! the approval state machine, and the advisory conflict and visibility
//! rules. Nothing in here performs I/O; the api layer feeds it rows and
//! persists whatever it decides.

pub mod calendar;
pub mod conflict;
pub mod encashment;
pub mod visibility;
pub mod workflow;

#[cfg(test)]
mod tests {
    use super::calendar::business_day_count;
    use super::workflow::{self, Decision, LeaveStatus, Stage};
    use crate::model::role::Role;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    /// An employee's Wed-Fri request travels the whole chain and the
    /// final approval deducts exactly its working-day count.
    #[test]
    fn approved_request_deducts_exactly_its_working_days() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(); // Wednesday
        let end = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(); // Friday
        let holidays = HashSet::new();
        let mut balance = 12i32;

        let stage = workflow::initial_stage(Role::Employee);
        assert_eq!(stage, Stage::Manager);

        let t = workflow::apply(stage, LeaveStatus::Pending, Role::Manager, Decision::Approve)
            .unwrap();
        assert!(!t.deducts_balance);
        assert_eq!(t.next_stage, Stage::Hrd);

        let t = workflow::apply(t.next_stage, t.next_status, Role::Hrd, Decision::Approve).unwrap();
        assert!(t.deducts_balance);
        balance -= business_day_count(start, end, &holidays) as i32;

        assert_eq!(balance, 9);
        assert_eq!(t.next_status, LeaveStatus::Approved);
        assert_eq!(t.next_stage, Stage::Completed);
    }

    /// A non-deducting leave type leaves the balance alone even through
    /// final approval.
    #[test]
    fn non_deducting_type_keeps_the_balance() {
        let t = workflow::apply(Stage::Hrd, LeaveStatus::Pending, Role::Hrd, Decision::Approve)
            .unwrap();

        let is_quota_deduction = false;
        let deduction = if t.deducts_balance && is_quota_deduction {
            3
        } else {
            0
        };
        assert_eq!(deduction, 0);
    }
}
