use crate::model::role::Role;

/// Who is looking at the shared calendar.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub employee_id: u64,
    pub role: Role,
    pub department: String,
}

/// The requester behind an approved calendar entry.
#[derive(Debug, Clone)]
pub struct Requester {
    pub employee_id: u64,
    pub manager_id: Option<u64>,
    pub department: String,
}

/// Scope filter for approved requests on the shared calendar.
///
/// - hrd sees everything
/// - everyone sees their own entries
/// - manager sees direct reports only
/// - dfd sees direct reports plus the whole department (approximation
///   of multi-level reports; the manager chain is never walked)
/// - employee sees only their own
pub fn visible_to(viewer: &Viewer, requester: &Requester) -> bool {
    if viewer.role == Role::Hrd {
        return true;
    }
    if requester.employee_id == viewer.employee_id {
        return true;
    }

    match viewer.role {
        Role::Manager => requester.manager_id == Some(viewer.employee_id),
        Role::Dfd => {
            requester.manager_id == Some(viewer.employee_id)
                || requester.department == viewer.department
        }
        Role::Employee => false,
        Role::Hrd => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(id: u64, role: Role, dept: &str) -> Viewer {
        Viewer { employee_id: id, role, department: dept.to_string() }
    }

    fn requester(id: u64, manager_id: Option<u64>, dept: &str) -> Requester {
        Requester { employee_id: id, manager_id, department: dept.to_string() }
    }

    #[test]
    fn hrd_sees_everything() {
        let hrd = viewer(1, Role::Hrd, "HR");
        assert!(visible_to(&hrd, &requester(99, None, "IT")));
        assert!(visible_to(&hrd, &requester(1, None, "HR")));
    }

    #[test]
    fn everyone_sees_their_own_entries() {
        for role in [Role::Employee, Role::Manager, Role::Dfd, Role::Hrd] {
            let me = viewer(5, role, "IT");
            assert!(visible_to(&me, &requester(5, Some(2), "IT")));
        }
    }

    #[test]
    fn manager_sees_exactly_direct_reports() {
        let mgr = viewer(7, Role::Manager, "IT");
        assert!(visible_to(&mgr, &requester(30, Some(7), "IT")));
        // same department but reporting elsewhere stays hidden
        assert!(!visible_to(&mgr, &requester(31, Some(8), "IT")));
        assert!(!visible_to(&mgr, &requester(32, None, "IT")));
    }

    #[test]
    fn dfd_sees_reports_and_department() {
        let dfd = viewer(3, Role::Dfd, "IT");
        assert!(visible_to(&dfd, &requester(7, Some(3), "IT"))); // direct report
        assert!(visible_to(&dfd, &requester(30, Some(7), "IT"))); // same department
        assert!(!visible_to(&dfd, &requester(50, Some(9), "Finance")));
    }

    #[test]
    fn employee_never_sees_a_peer() {
        let emp = viewer(30, Role::Employee, "IT");
        assert!(!visible_to(&emp, &requester(31, Some(7), "IT")));
        assert!(!visible_to(&emp, &requester(7, None, "IT")));
    }
}
