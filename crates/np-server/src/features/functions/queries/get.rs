use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::FunctionalSystem;
use crate::models::Function;

const FUNCTION_COLUMNS: &str = "f.id, f.native_id, f.name, f.namespace, f.type, f.description, f.obsolete";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFunctionQuery {
    /// Numeric id, native id or name
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetFunctionResponse {
    pub function: Function,
    /// External page for the term in its naming system
    pub link: Option<String>,
    /// Functions with a relationship pointing at this one
    pub children: Vec<Function>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetFunctionError {
    #[error("Function name is required")]
    NameRequired,
    #[error("Couldn't find function: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GetFunctionQuery {
    pub fn validate(&self) -> Result<(), GetFunctionError> {
        if self.name.trim().is_empty() {
            return Err(GetFunctionError::NameRequired);
        }
        Ok(())
    }
}

async fn find_function(pool: &PgPool, key: &str) -> sqlx::Result<Option<Function>> {
    if let Ok(id) = key.parse::<i32>() {
        let sql = format!("SELECT {} FROM functions f WHERE f.id = $1", FUNCTION_COLUMNS);
        if let Some(function) = sqlx::query_as::<_, Function>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
        {
            return Ok(Some(function));
        }
    }

    for column in ["native_id", "name"] {
        let sql = format!(
            "SELECT {} FROM functions f WHERE f.{} = $1 ORDER BY f.id LIMIT 1",
            FUNCTION_COLUMNS, column
        );
        if let Some(function) = sqlx::query_as::<_, Function>(&sql)
            .bind(key)
            .fetch_optional(pool)
            .await?
        {
            return Ok(Some(function));
        }
    }
    Ok(None)
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetFunctionQuery,
) -> Result<GetFunctionResponse, GetFunctionError> {
    query.validate()?;

    let function = find_function(&pool, &query.name)
        .await?
        .ok_or_else(|| GetFunctionError::NotFound(query.name.clone()))?;

    let sql = format!(
        "SELECT {} FROM function_relationships fr
         JOIN functions f ON f.id = fr.function_id
         WHERE fr.target_id = $1
         ORDER BY f.name",
        FUNCTION_COLUMNS
    );
    let children = sqlx::query_as::<_, Function>(&sql)
        .bind(function.id)
        .fetch_all(&pool)
        .await?;

    let link = function
        .function_type
        .as_deref()
        .and_then(FunctionalSystem::by_name)
        .zip(function.native_id.as_deref())
        .and_then(|(system, native_id)| system.link_to_term(native_id));

    Ok(GetFunctionResponse {
        function,
        link,
        children,
    })
}
