use chrono::NaiveDate;

/// The slice of an approved request the detector needs: who is away,
/// where they sit, and when.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeptLeave {
    pub request_id: u64,
    pub employee_id: u64,
    pub employee_name: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn overlaps(a: &DeptLeave, b: &DeptLeave) -> bool {
    a.start_date <= b.end_date && b.start_date <= a.end_date
}

/// Approved requests, other than the candidate itself, from the same
/// department whose inclusive date range overlaps the candidate's.
/// Advisory only: shown to the reviewing approver, never blocking.
pub fn find_conflicts<'a>(candidate: &DeptLeave, approved: &'a [DeptLeave]) -> Vec<&'a DeptLeave> {
    approved
        .iter()
        .filter(|other| {
            other.request_id != candidate.request_id
                && other.department == candidate.department
                && overlaps(candidate, other)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leave(id: u64, dept: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> DeptLeave {
        DeptLeave {
            request_id: id,
            employee_id: id * 10,
            employee_name: format!("emp-{id}"),
            department: dept.to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn overlapping_same_department_pairs_are_mutual() {
        let a = leave(1, "IT", (2024, 3, 4), (2024, 3, 8));
        let b = leave(2, "IT", (2024, 3, 6), (2024, 3, 12));
        let pool = vec![a.clone(), b.clone()];

        assert_eq!(find_conflicts(&a, &pool), vec![&pool[1]]);
        assert_eq!(find_conflicts(&b, &pool), vec![&pool[0]]);
    }

    #[test]
    fn containment_counts_as_overlap() {
        // candidate fully contains the existing leave
        let outer = leave(1, "IT", (2024, 3, 1), (2024, 3, 20));
        let inner = leave(2, "IT", (2024, 3, 5), (2024, 3, 7));
        assert_eq!(find_conflicts(&outer, std::slice::from_ref(&inner)).len(), 1);
        assert_eq!(find_conflicts(&inner, std::slice::from_ref(&outer)).len(), 1);
    }

    #[test]
    fn shared_boundary_day_conflicts() {
        let a = leave(1, "IT", (2024, 3, 4), (2024, 3, 6));
        let b = leave(2, "IT", (2024, 3, 6), (2024, 3, 8));
        assert_eq!(find_conflicts(&a, std::slice::from_ref(&b)).len(), 1);
    }

    #[test]
    fn disjoint_or_cross_department_never_conflicts() {
        let a = leave(1, "IT", (2024, 3, 4), (2024, 3, 6));
        let later = leave(2, "IT", (2024, 3, 7), (2024, 3, 8));
        let other_dept = leave(3, "Finance", (2024, 3, 4), (2024, 3, 6));

        assert!(find_conflicts(&a, &[later]).is_empty());
        assert!(find_conflicts(&a, &[other_dept]).is_empty());
    }

    #[test]
    fn candidate_is_excluded_from_its_own_conflicts() {
        let a = leave(1, "IT", (2024, 3, 4), (2024, 3, 6));
        assert!(find_conflicts(&a, std::slice::from_ref(&a)).is_empty());
    }
}
