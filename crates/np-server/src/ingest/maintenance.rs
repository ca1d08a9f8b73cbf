//! Housekeeping on imported data

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use super::kegg::{KEGG_TYPE, PATHWAY_NAMESPACE};
use super::Result;
use crate::models::Function;

/// A `(gene, function)` pair stored more than once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DuplicateGeneFunction {
    pub gene_id: i32,
    pub function_id: i32,
    pub copies: i64,
}

pub async fn find_duplicate_gene_functions(pool: &PgPool) -> Result<Vec<DuplicateGeneFunction>> {
    let duplicates = sqlx::query_as::<_, DuplicateGeneFunction>(
        "SELECT gene_id, function_id, COUNT(*) AS copies
         FROM gene_functions
         GROUP BY gene_id, function_id
         HAVING COUNT(*) > 1
         ORDER BY gene_id, function_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(duplicates)
}

/// Keep the lowest id of each `(gene_id, function_id)` pair; returns rows deleted
#[tracing::instrument(skip(pool))]
pub async fn dedupe_gene_functions(pool: &PgPool) -> Result<u64> {
    let deleted = sqlx::query(
        "DELETE FROM gene_functions a
         USING gene_functions b
         WHERE a.gene_id = b.gene_id
           AND a.function_id = b.function_id
           AND a.id > b.id",
    )
    .execute(pool)
    .await?
    .rows_affected();

    info!(deleted, "Removed duplicate gene functions");
    Ok(deleted)
}

pub async fn list_kegg_pathways(pool: &PgPool) -> Result<Vec<Function>> {
    let pathways = sqlx::query_as::<_, Function>(
        "SELECT id, native_id, name, namespace, type, description, obsolete
         FROM functions
         WHERE type = $1 AND namespace = $2
         ORDER BY native_id",
    )
    .bind(KEGG_TYPE)
    .bind(PATHWAY_NAMESPACE)
    .fetch_all(pool)
    .await?;
    Ok(pathways)
}
