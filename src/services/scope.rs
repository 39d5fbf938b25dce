use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::user::Role;

/// Predicate over the candidates table restricting which records an
/// identity may list, read, mutate, or aggregate over. Every repository
/// operation composes with this; the admin/leader/member rules live here
/// and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateScope {
    /// No restriction (admin).
    All,
    /// Only records owned by one of these users.
    Owners(Vec<Uuid>),
}

impl CandidateScope {
    /// Pure construction from `{user_id, role, member_ids}`. A leader with
    /// zero members scopes to own records only; that is not an error.
    pub fn for_identity(user_id: Uuid, role: Role, member_ids: Vec<Uuid>) -> Self {
        match role {
            Role::Admin => CandidateScope::All,
            Role::TeamLeader => {
                let mut owners = Vec::with_capacity(member_ids.len() + 1);
                owners.push(user_id);
                for id in member_ids {
                    if !owners.contains(&id) {
                        owners.push(id);
                    }
                }
                CandidateScope::Owners(owners)
            }
            Role::TeamMember => CandidateScope::Owners(vec![user_id]),
        }
    }

    /// Builds the scope for a resolved identity. Team membership is
    /// re-fetched on every invocation; caching it would serve stale
    /// membership and leak or hide records across requests.
    pub async fn resolve(pool: &PgPool, user_id: Uuid, role: Role) -> Result<Self> {
        let member_ids = if role == Role::TeamLeader {
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE team_leader = $1")
                .bind(user_id)
                .fetch_all(pool)
                .await?
        } else {
            Vec::new()
        };
        Ok(Self::for_identity(user_id, role, member_ids))
    }

    pub fn allows(&self, owner: Option<Uuid>) -> bool {
        match self {
            CandidateScope::All => true,
            CandidateScope::Owners(ids) => owner.is_some_and(|o| ids.contains(&o)),
        }
    }

    /// Appends this scope as a predicate to a WHERE clause under
    /// construction. `ANY` over a single bound array cannot double-count
    /// a row even when an owner id were listed twice.
    pub fn push_predicate<'args>(&self, qb: &mut QueryBuilder<'args, Postgres>) {
        match self {
            CandidateScope::All => {
                qb.push("TRUE");
            }
            CandidateScope::Owners(ids) => {
                qb.push("user_id = ANY(");
                qb.push_bind(ids.clone());
                qb.push(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn admin_scope_is_unrestricted() {
        let me = Uuid::new_v4();
        let scope = CandidateScope::for_identity(me, Role::Admin, vec![]);
        assert_eq!(scope, CandidateScope::All);
        assert!(scope.allows(Some(Uuid::new_v4())));
        assert!(scope.allows(None));
    }

    #[test]
    fn member_scope_is_own_records_only() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let scope = CandidateScope::for_identity(me, Role::TeamMember, vec![]);
        assert!(scope.allows(Some(me)));
        assert!(!scope.allows(Some(other)));
        assert!(!scope.allows(None));
    }

    #[test]
    fn leader_scope_is_self_plus_first_level_members() {
        let me = Uuid::new_v4();
        let members = ids(2);
        let scope = CandidateScope::for_identity(me, Role::TeamLeader, members.clone());
        assert!(scope.allows(Some(me)));
        assert!(scope.allows(Some(members[0])));
        assert!(scope.allows(Some(members[1])));
        assert!(!scope.allows(Some(Uuid::new_v4())));
    }

    #[test]
    fn leader_with_no_members_scopes_to_self() {
        let me = Uuid::new_v4();
        let scope = CandidateScope::for_identity(me, Role::TeamLeader, vec![]);
        assert_eq!(scope, CandidateScope::Owners(vec![me]));
    }

    #[test]
    fn leader_owner_list_is_deduplicated() {
        let me = Uuid::new_v4();
        let member = Uuid::new_v4();
        let scope = CandidateScope::for_identity(me, Role::TeamLeader, vec![member, me, member]);
        assert_eq!(scope, CandidateScope::Owners(vec![me, member]));
    }

    #[test]
    fn predicate_sql_shape() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM candidates WHERE ");
        CandidateScope::All.push_predicate(&mut qb);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM candidates WHERE TRUE");

        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM candidates WHERE ");
        CandidateScope::Owners(ids(2)).push_predicate(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM candidates WHERE user_id = ANY($1)"
        );
    }
}
