use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::functional_system::TopLevel;
use crate::domain::FunctionalSystem;
use crate::models::Function;

const FUNCTION_COLUMNS: &str = "id, native_id, name, namespace, type, description, obsolete";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFunctionsQuery {
    /// `kegg`, `go`, `cog` or `tigr`
    pub system: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListFunctionsResponse {
    pub system: &'static FunctionalSystem,
    pub linked_description: String,
    pub functions: Vec<Function>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListFunctionsError {
    #[error("Unknown functional system: {0}")]
    UnknownSystem(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListFunctionsQuery {
    pub fn validate(&self) -> Result<&'static FunctionalSystem, ListFunctionsError> {
        FunctionalSystem::by_name(&self.system)
            .ok_or_else(|| ListFunctionsError::UnknownSystem(self.system.clone()))
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListFunctionsQuery,
) -> Result<ListFunctionsResponse, ListFunctionsError> {
    let system = query.validate()?;

    let functions = match system.top_level() {
        TopLevel::Namespace(namespace) => {
            let sql = format!(
                "SELECT {} FROM functions WHERE type = $1 AND namespace = $2 ORDER BY name",
                FUNCTION_COLUMNS
            );
            sqlx::query_as::<_, Function>(&sql)
                .bind(system.name)
                .bind(namespace)
                .fetch_all(&pool)
                .await?
        },
        TopLevel::NativeIds(native_ids) => {
            let sql = format!(
                "SELECT {} FROM functions WHERE type = $1 AND native_id = ANY($2) ORDER BY name",
                FUNCTION_COLUMNS
            );
            sqlx::query_as::<_, Function>(&sql)
                .bind(system.name)
                .bind(native_ids)
                .fetch_all(&pool)
                .await?
        },
    };

    Ok(ListFunctionsResponse {
        system,
        linked_description: system.linked_description(),
        functions,
    })
}
