use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Two-tier reporting model: a team-member carries a weak reference to its
/// team-leader; admins sit outside the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    TeamLeader,
    TeamMember,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::TeamLeader => "team-leader",
            Role::TeamMember => "team-member",
        }
    }

    /// Unknown role strings fall back to team-member, the most restrictive
    /// scope.
    pub fn parse(raw: &str) -> Role {
        match raw {
            "admin" => Role::Admin,
            "team-leader" => Role::TeamLeader,
            _ => Role::TeamMember,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub team_leader: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }
}

/// Listing row with the leader's username resolved for display.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserWithLeader {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub team_leader: Option<Uuid>,
    pub team_leader_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Admin, Role::TeamLeader, Role::TeamMember] {
            assert_eq!(Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_team_member() {
        assert_eq!(Role::parse("recruiter"), Role::TeamMember);
        assert_eq!(Role::parse(""), Role::TeamMember);
    }
}
