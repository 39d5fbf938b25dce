use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::dropdown_dto::{CreateDropdownPayload, UpdateDropdownPayload};
use crate::error::{Error, Result};
use crate::models::dropdown::Dropdown;

const DROPDOWN_COLUMNS: &str = "id, field, placeholder, options, created_at, updated_at";

#[derive(Clone)]
pub struct DropdownService {
    pool: PgPool,
}

impl DropdownService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Field-name-keyed map of option lists, the shape every candidate
    /// form render consumes.
    pub async fn get_all(&self) -> Result<HashMap<String, Vec<String>>> {
        let dropdowns = sqlx::query_as::<_, Dropdown>(&format!(
            "SELECT {} FROM dropdowns ORDER BY field",
            DROPDOWN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(dropdowns
            .into_iter()
            .map(|d| (d.field, d.options))
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Dropdown> {
        let dropdown = sqlx::query_as::<_, Dropdown>(&format!(
            "SELECT {} FROM dropdowns WHERE id = $1",
            DROPDOWN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Dropdown not found".to_string()))?;
        Ok(dropdown)
    }

    pub async fn create(&self, payload: CreateDropdownPayload) -> Result<Dropdown> {
        let existing = sqlx::query("SELECT id FROM dropdowns WHERE field = $1")
            .bind(&payload.field)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(format!(
                "Dropdown '{}' already exists",
                payload.field
            )));
        }

        let dropdown = sqlx::query_as::<_, Dropdown>(&format!(
            "INSERT INTO dropdowns (field, placeholder, options) VALUES ($1, $2, $3) RETURNING {}",
            DROPDOWN_COLUMNS
        ))
        .bind(payload.field)
        .bind(payload.placeholder)
        .bind(payload.options)
        .fetch_one(&self.pool)
        .await?;
        Ok(dropdown)
    }

    /// The option list is replaced wholesale, never merged.
    pub async fn update(&self, id: Uuid, payload: UpdateDropdownPayload) -> Result<Dropdown> {
        let dropdown = sqlx::query_as::<_, Dropdown>(&format!(
            r#"
            UPDATE dropdowns
            SET
                field = COALESCE($2, field),
                placeholder = COALESCE($3, placeholder),
                options = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DROPDOWN_COLUMNS
        ))
        .bind(id)
        .bind(payload.field)
        .bind(payload.placeholder)
        .bind(payload.options)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Dropdown not found".to_string()))?;
        Ok(dropdown)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM dropdowns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Dropdown not found".to_string()));
        }
        Ok(())
    }
}
