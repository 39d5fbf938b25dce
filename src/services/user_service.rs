use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::CreateUserPayload;
use crate::error::{Error, Result};
use crate::models::user::{Role, User, UserWithLeader};
use crate::utils::crypto;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, team_leader, created_at, updated_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Accounts are created by admins and team-leaders only; there is no
    /// self-registration flow. The team-leader reference is honoured only
    /// for team-members and nulled for every other role.
    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<User> {
        if Role::parse(&payload.role).as_str() != payload.role {
            return Err(Error::BadRequest(format!(
                "Unknown role '{}'",
                payload.role
            )));
        }

        let existing = sqlx::query("SELECT id FROM users WHERE email = $1 OR username = $2")
            .bind(&payload.email)
            .bind(&payload.username)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::BadRequest("User already exists".to_string()));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
        let team_leader = if Role::parse(&payload.role) == Role::TeamMember {
            payload.team_leader
        } else {
            None
        };

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, role, team_leader)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(payload.username)
        .bind(payload.email)
        .bind(password_hash)
        .bind(payload.role)
        .bind(team_leader)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<UserWithLeader>> {
        let users = sqlx::query_as::<_, UserWithLeader>(
            r#"
            SELECT u.id, u.username, u.email, u.role, u.team_leader,
                   l.username AS team_leader_name, u.created_at
            FROM users u
            LEFT JOIN users l ON l.id = u.team_leader
            ORDER BY u.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
