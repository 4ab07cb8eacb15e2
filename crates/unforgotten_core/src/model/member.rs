//! Account membership roles.

use serde::{Deserialize, Serialize};

/// Role of the signed-in user inside the currently selected account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Admin,
    /// Can maintain care data but not account membership.
    Helper,
    /// Read-only access.
    Viewer,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Helper => "helper",
            Self::Viewer => "viewer",
        }
    }

    /// Whether the role may create or modify care data.
    pub fn can_write(self) -> bool {
        !matches!(self, Self::Viewer)
    }

    /// Whether the role may manage account members and invitations.
    pub fn can_manage_members(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Parses the stable role label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "helper" => Some(Self::Helper),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemberRole;

    #[test]
    fn permission_ladder() {
        assert!(MemberRole::Owner.can_manage_members());
        assert!(MemberRole::Admin.can_manage_members());
        assert!(!MemberRole::Helper.can_manage_members());
        assert!(MemberRole::Helper.can_write());
        assert!(!MemberRole::Viewer.can_write());
    }

    #[test]
    fn parse_round_trips_labels() {
        for role in [
            MemberRole::Owner,
            MemberRole::Admin,
            MemberRole::Helper,
            MemberRole::Viewer,
        ] {
            assert_eq!(MemberRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(MemberRole::parse("guest"), None);
    }
}
