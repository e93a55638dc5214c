use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Organizational role. Stored as a lowercase string on the employee
/// profile and as a numeric id inside JWT claims.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee = 1,
    Manager = 2,
    Dfd = 3,
    Hrd = 4,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Employee),
            2 => Some(Role::Manager),
            3 => Some(Role::Dfd),
            4 => Some(Role::Hrd),
            _ => None,
        }
    }

    pub fn as_id(self) -> u8 {
        self as u8
    }

    /// Roles that act on pending requests somewhere in the chain.
    pub fn is_approver(self) -> bool {
        matches!(self, Role::Manager | Role::Dfd | Role::Hrd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn id_round_trip() {
        for role in [Role::Employee, Role::Manager, Role::Dfd, Role::Hrd] {
            assert_eq!(Role::from_id(role.as_id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(9), None);
    }

    #[test]
    fn string_round_trip() {
        assert_eq!(Role::from_str("dfd").unwrap(), Role::Dfd);
        assert_eq!(Role::Hrd.to_string(), "hrd");
        assert!(Role::from_str("admin").is_err());
    }
}
